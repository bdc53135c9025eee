use anchor_lang::prelude::*;

use crate::constants::{INITIAL_SHARE_MULTIPLIER, MAX_ASSETS, USD_UNIT};
use crate::errors::ErrorCode;
use crate::state::oracle::usd_value_bulk;
use crate::state::strategy::DhwSettlement;

/// Immutable record of one settled do-hard-work round. Written once by
/// `do_hard_work` and only ever read afterwards; all deferred vault
/// accounting is reconstructed from these.
#[account]
#[derive(Default, Debug, InitSpace)]
pub struct DhwSnapshot {
    pub strategy: Pubkey,
    pub dhw_index: u64,
    pub bump: u8,

    pub assets_deposited: [u64; MAX_ASSETS],
    pub exchange_rates: [u64; MAX_ASSETS],
    pub shares_minted: u64,
    pub shares_redeemed: u64,
    pub assets_withdrawn: [u64; MAX_ASSETS],

    /// Strategy value and share supply the moment before this round's
    /// deposits were priced in, i.e. the share price the round settled at.
    pub value_before_deposits: u128,
    pub shares_before_deposits: u64,

    pub yield_bps: i64,
    pub timestamp: i64,
}

impl DhwSnapshot {
    pub fn record(
        &mut self,
        strategy: Pubkey,
        dhw_index: u64,
        bump: u8,
        rates: &[u64],
        settlement: &DhwSettlement,
        timestamp: i64,
    ) {
        self.strategy = strategy;
        self.dhw_index = dhw_index;
        self.bump = bump;
        self.exchange_rates[..rates.len()].copy_from_slice(rates);

        self.assets_deposited = settlement.assets_deposited;
        self.shares_minted = settlement.shares_minted;
        self.shares_redeemed = settlement.shares_redeemed;
        self.assets_withdrawn = settlement.assets_withdrawn;
        self.value_before_deposits = settlement.value_before_deposits;
        self.shares_before_deposits = settlement.shares_before_deposits;
        self.yield_bps = settlement.yield_bps;
        self.timestamp = timestamp;
    }

    /// Total USD deposited into the strategy this round, at the round's own
    /// exchange rates. Vault claims are priced against this, never against
    /// current rates.
    pub fn deposited_usd(&self) -> u128 {
        usd_value_bulk(&self.assets_deposited, &self.exchange_rates)
    }

    /// A depositor's cut of the shares this round minted.
    pub fn share_of_minted(&self, deposited_usd: u128) -> Result<u64> {
        let total = self.deposited_usd();
        if deposited_usd > total {
            return Err(ErrorCode::InsufficientShares.into());
        }
        if total == 0 {
            return Ok(0);
        }

        Ok((self.shares_minted as u128 * deposited_usd / total) as u64)
    }

    /// USD value a share balance had at this round's share price. Shares
    /// minted in a bootstrap round are priced at the initial multiplier.
    pub fn share_value_usd(&self, shares: u64) -> u128 {
        if self.shares_before_deposits == 0 {
            return shares as u128 * USD_UNIT as u128 / INITIAL_SHARE_MULTIPLIER as u128;
        }

        shares as u128 * self.value_before_deposits / self.shares_before_deposits as u128
    }

    /// Caller's pro-rata cut of the assets this round withdrew. Division
    /// rounds down; sub-unit residue is an accepted loss.
    pub fn claim_withdrawals(&self, shares: u64) -> Result<[u64; MAX_ASSETS]> {
        if self.shares_redeemed == 0 {
            return Err(ErrorCode::NothingToClaim.into());
        }
        if shares > self.shares_redeemed {
            return Err(ErrorCode::InsufficientShares.into());
        }

        let mut amounts = [0u64; MAX_ASSETS];
        for (i, withdrawn) in self.assets_withdrawn.iter().enumerate() {
            amounts[i] = (*withdrawn as u128 * shares as u128 / self.shares_redeemed as u128) as u64;
        }

        Ok(amounts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::USD_UNIT;

    fn snapshot() -> DhwSnapshot {
        let mut snapshot = DhwSnapshot::default();
        snapshot.record(
            Pubkey::new_unique(),
            1,
            255,
            &[USD_UNIT],
            &DhwSettlement {
                assets_deposited: [1_000, 0, 0, 0],
                shares_minted: 1_000_000,
                shares_redeemed: 300,
                assets_withdrawn: [150, 0, 0, 0],
                value_before_deposits: 0,
                shares_before_deposits: 0,
                yield_bps: 0,
            },
            1_700_000_000,
        );
        snapshot
    }

    #[test]
    fn minted_shares_split_by_deposited_usd() {
        let snapshot = snapshot();

        // 40% of the round's deposited USD claims 40% of minted shares
        let usd = 400u128 * USD_UNIT as u128;
        assert_eq!(snapshot.share_of_minted(usd).unwrap(), 400_000);
        assert!(snapshot.share_of_minted(snapshot.deposited_usd() + 1).is_err());
    }

    #[test]
    fn withdrawal_claims_are_pro_rata_with_dust_down() {
        let snapshot = snapshot();

        assert_eq!(snapshot.claim_withdrawals(100).unwrap()[0], 50);
        // 101/300 of 150 rounds down, one unit of dust stays behind
        assert_eq!(snapshot.claim_withdrawals(101).unwrap()[0], 50);
        assert!(snapshot.claim_withdrawals(301).is_err());
    }

    #[test]
    fn bootstrap_round_prices_shares_at_initial_multiplier() {
        let snapshot = snapshot();

        // the full bootstrap mint is worth exactly what was deposited
        let value = snapshot.share_value_usd(snapshot.shares_minted);
        assert_eq!(value, snapshot.deposited_usd());
    }

    #[test]
    fn claim_on_round_without_redemptions_fails() {
        let mut snapshot = snapshot();
        snapshot.shares_redeemed = 0;
        assert!(snapshot.claim_withdrawals(1).is_err());
    }
}
