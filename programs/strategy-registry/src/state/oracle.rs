use anchor_lang::prelude::*;

use crate::errors::ErrorCode;

/// USD amounts produced here carry the USD_UNIT price scale, so values stay
/// exact until a final division at the consumer.
pub fn usd_value(amount: u64, rate: u64) -> u128 {
    amount as u128 * rate as u128
}

pub fn usd_value_bulk(amounts: &[u64], rates: &[u64]) -> u128 {
    amounts
        .iter()
        .zip(rates.iter())
        .map(|(amount, rate)| usd_value(*amount, *rate))
        .sum()
}

#[account]
#[derive(Default, Debug, InitSpace)]
pub struct PriceFeed {
    pub asset: Pubkey,
    /// USD_UNIT-scaled price of one raw asset unit.
    pub price: u64,
    pub last_update: i64,
    pub bump: u8,
}

impl PriceFeed {
    pub fn init(&mut self, asset: Pubkey, bump: u8) {
        self.asset = asset;
        self.bump = bump;
    }

    pub fn set_price(&mut self, price: u64, now: i64) -> Result<()> {
        if price == 0 {
            return Err(ErrorCode::ZeroValue.into());
        }

        self.price = price;
        self.last_update = now;
        Ok(())
    }

    /// Stale data aborts rather than being used, there is no fallback price.
    pub fn current_rate(&self, now: i64, max_age: i64) -> Result<u64> {
        if self.price == 0 || now - self.last_update > max_age {
            return Err(ErrorCode::StalePrice.into());
        }

        Ok(self.price)
    }

    pub fn rate_within(&self, now: i64, max_age: i64, bounds: [u64; 2]) -> Result<u64> {
        let rate = self.current_rate(now, max_age)?;
        if rate < bounds[0] || rate > bounds[1] {
            return Err(ErrorCode::ExchangeRateOutOfSlippage.into());
        }

        Ok(rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usd_value_keeps_price_scale() {
        // 1000 raw units at a 1.00 USD price stays USD_UNIT-scaled
        assert_eq!(usd_value(1_000, 100_000_000), 100_000_000_000);
        assert_eq!(usd_value_bulk(&[1_000, 500], &[100_000_000, 200_000_000]), 200_000_000_000);
    }

    #[test]
    fn stale_feed_is_rejected() {
        let mut feed = PriceFeed::default();
        feed.set_price(100_000_000, 1_000).unwrap();

        assert_eq!(feed.current_rate(1_100, 300).unwrap(), 100_000_000);
        assert!(feed.current_rate(1_400, 300).is_err());
    }

    #[test]
    fn rate_slippage_bounds_are_inclusive() {
        let mut feed = PriceFeed::default();
        feed.set_price(100, 0).unwrap();

        assert!(feed.rate_within(0, 60, [100, 100]).is_ok());
        assert!(feed.rate_within(0, 60, [90, 99]).is_err());
        assert!(feed.rate_within(0, 60, [101, 110]).is_err());
    }
}
