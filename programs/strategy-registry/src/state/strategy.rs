use anchor_lang::prelude::*;

use crate::constants::{INITIAL_SHARE_MULTIPLIER, MAX_ASSETS, MAX_BPS, STRATEGY_SEED, USD_UNIT};
use crate::errors::ErrorCode;
use crate::state::oracle::usd_value_bulk;

/// Per-strategy ledger entry. The position mirror (`balances`, `total_shares`)
/// tracks what the external protocol position is worth in group assets; only
/// `do_hard_work` and the fast deposit/redeem paths may touch it.
#[account]
#[derive(Default, Debug, InitSpace)]
pub struct Strategy {
    pub key: Pubkey,
    pub index: u64,
    pub index_buffer: [u8; 8],
    pub bump: u8,

    pub asset_group_id: u64,
    pub num_assets: u8,
    pub is_removed: bool,

    /// Next not-yet-settled do-hard-work index. Starts at 1, advances by
    /// exactly one per settlement.
    pub current_dhw_index: u64,
    pub pending_deposits: [u64; MAX_ASSETS],
    pub pending_withdrawal_shares: u64,

    pub balances: [u64; MAX_ASSETS],
    pub total_shares: u64,

    /// Ideal deposit ratio, refreshed at every settlement from the live
    /// balances.
    pub asset_ratio: [u64; MAX_ASSETS],
}

/// Everything one settlement produced, in the shape the snapshot records it.
#[derive(Default, Debug, Clone, Copy)]
pub struct DhwSettlement {
    pub assets_deposited: [u64; MAX_ASSETS],
    pub shares_minted: u64,
    pub shares_redeemed: u64,
    pub assets_withdrawn: [u64; MAX_ASSETS],
    pub value_before_deposits: u128,
    pub shares_before_deposits: u64,
    pub yield_bps: i64,
}

impl Strategy {
    pub fn seeds(&self) -> [&[u8]; 3] {
        [
            STRATEGY_SEED.as_bytes(),
            self.index_buffer.as_ref(),
            std::slice::from_ref(&self.bump),
        ]
    }

    pub fn init(
        &mut self,
        key: Pubkey,
        index: u64,
        bump: u8,
        asset_group_id: u64,
        num_assets: u8,
        asset_ratio: &[u64],
    ) -> Result<()> {
        if asset_ratio.len() != num_assets as usize || asset_ratio.iter().all(|r| *r == 0) {
            return Err(ErrorCode::InvalidAssetRatio.into());
        }

        self.key = key;
        self.index = index;
        self.index_buffer = index.to_le_bytes();
        self.bump = bump;
        self.asset_group_id = asset_group_id;
        self.num_assets = num_assets;
        self.current_dhw_index = 1;
        self.asset_ratio[..asset_ratio.len()].copy_from_slice(asset_ratio);

        Ok(())
    }

    pub fn assets_len(&self) -> usize {
        self.num_assets as usize
    }

    pub fn mark_removed(&mut self) {
        self.is_removed = true;
    }

    pub fn not_removed(&self) -> Result<()> {
        if self.is_removed {
            return Err(ErrorCode::GhostStrategy.into());
        }
        Ok(())
    }

    pub fn total_value_usd(&self, rates: &[u64]) -> u128 {
        usd_value_bulk(&self.balances[..self.assets_len()], rates)
    }

    /// Accumulates pending deposits for the current index; funds do not move
    /// here. Returns the index the amounts were assigned to.
    pub fn add_deposits(&mut self, amounts: &[u64; MAX_ASSETS]) -> Result<u64> {
        self.not_removed()?;

        for (pending, amount) in self.pending_deposits.iter_mut().zip(amounts.iter()) {
            *pending += amount;
        }

        Ok(self.current_dhw_index)
    }

    pub fn add_withdrawals(&mut self, shares: u64) -> Result<u64> {
        if shares == 0 {
            return Err(ErrorCode::ZeroValue.into());
        }

        self.pending_withdrawal_shares += shares;
        Ok(self.current_dhw_index)
    }

    /// Settles one do-hard-work round against the position mirror. This is
    /// the only place `current_dhw_index` advances.
    pub fn settle(&mut self, rates: &[u64], yield_bps: i64) -> Result<DhwSettlement> {
        self.not_removed()?;

        self.apply_yield(yield_bps);

        let value_before = self.total_value_usd(rates);
        let shares_before = self.total_shares;

        let assets_deposited = self.pending_deposits;
        let deposited_usd = usd_value_bulk(&assets_deposited[..self.assets_len()], rates);

        // A position wiped out by a total-loss round reprices like a fresh
        // one: outstanding shares are worthless, not a divisor.
        let shares_minted = if deposited_usd == 0 {
            0
        } else if shares_before == 0 || value_before == 0 {
            (deposited_usd * INITIAL_SHARE_MULTIPLIER as u128 / USD_UNIT as u128) as u64
        } else {
            (deposited_usd * shares_before as u128 / value_before) as u64
        };

        for (balance, deposited) in self.balances.iter_mut().zip(assets_deposited.iter()) {
            *balance += deposited;
        }
        self.total_shares += shares_minted;

        let shares_redeemed = self.pending_withdrawal_shares;
        let assets_withdrawn = self.burn_shares(shares_redeemed)?;

        self.pending_deposits = [0; MAX_ASSETS];
        self.pending_withdrawal_shares = 0;
        self.current_dhw_index += 1;
        self.refresh_asset_ratio();

        Ok(DhwSettlement {
            assets_deposited,
            shares_minted,
            shares_redeemed,
            assets_withdrawn,
            value_before_deposits: value_before,
            shares_before_deposits: shares_before,
            yield_bps,
        })
    }

    /// Immediate redemption against the live position, bypassing the queue.
    pub fn redeem_fast(&mut self, shares: u64) -> Result<[u64; MAX_ASSETS]> {
        if shares == 0 {
            return Err(ErrorCode::ZeroValue.into());
        }

        self.burn_shares(shares)
    }

    /// Immediate deposit against the live position, used by reallocation.
    pub fn deposit_fast(&mut self, amounts: &[u64; MAX_ASSETS], rates: &[u64]) -> Result<u64> {
        self.not_removed()?;

        let deposited_usd = usd_value_bulk(&amounts[..self.assets_len()], rates);
        if deposited_usd == 0 {
            return Err(ErrorCode::ZeroValue.into());
        }

        let value = self.total_value_usd(rates);
        let shares = if self.total_shares == 0 || value == 0 {
            (deposited_usd * INITIAL_SHARE_MULTIPLIER as u128 / USD_UNIT as u128) as u64
        } else {
            (deposited_usd * self.total_shares as u128 / value) as u64
        };

        for (balance, amount) in self.balances.iter_mut().zip(amounts.iter()) {
            *balance += amount;
        }
        self.total_shares += shares;
        self.refresh_asset_ratio();

        Ok(shares)
    }

    fn burn_shares(&mut self, shares: u64) -> Result<[u64; MAX_ASSETS]> {
        let mut withdrawn = [0u64; MAX_ASSETS];
        if shares == 0 {
            return Ok(withdrawn);
        }
        if shares > self.total_shares {
            return Err(ErrorCode::InsufficientShares.into());
        }

        // Pro-rata rounds down; the residue stays in the position.
        for (i, balance) in self.balances.iter_mut().enumerate() {
            withdrawn[i] = (*balance as u128 * shares as u128 / self.total_shares as u128) as u64;
            *balance -= withdrawn[i];
        }
        self.total_shares -= shares;

        Ok(withdrawn)
    }

    fn apply_yield(&mut self, yield_bps: i64) {
        if yield_bps == 0 {
            return;
        }

        let scale = (MAX_BPS as i64 + yield_bps).max(0) as u128;
        for balance in self.balances.iter_mut() {
            *balance = (*balance as u128 * scale / MAX_BPS as u128) as u64;
        }
    }

    fn refresh_asset_ratio(&mut self) {
        if self.balances[..self.assets_len()].iter().any(|b| *b > 0) {
            self.asset_ratio = self.balances;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strategy(num_assets: u8) -> Strategy {
        let mut strategy = Strategy::default();
        strategy
            .init(Pubkey::new_unique(), 0, 255, 1, num_assets, &vec![1; num_assets as usize])
            .unwrap();
        strategy
    }

    const RATE: u64 = USD_UNIT; // 1.00 USD per raw unit

    #[test]
    fn dhw_index_advances_by_exactly_one() {
        let mut strategy = strategy(1);
        assert_eq!(strategy.current_dhw_index, 1);

        for expected in 2..6 {
            strategy.add_deposits(&[100, 0, 0, 0]).unwrap();
            strategy.settle(&[RATE], 0).unwrap();
            assert_eq!(strategy.current_dhw_index, expected);
        }
    }

    #[test]
    fn first_settlement_bootstraps_share_price() {
        let mut strategy = strategy(1);
        let index = strategy.add_deposits(&[1_000, 0, 0, 0]).unwrap();
        assert_eq!(index, 1);

        let settlement = strategy.settle(&[RATE], 0).unwrap();
        assert_eq!(settlement.shares_minted, 1_000 * INITIAL_SHARE_MULTIPLIER);
        assert_eq!(settlement.shares_before_deposits, 0);
        assert_eq!(strategy.total_shares, 1_000 * INITIAL_SHARE_MULTIPLIER);
        assert_eq!(strategy.balances[0], 1_000);
    }

    #[test]
    fn later_deposits_mint_at_current_share_value() {
        let mut strategy = strategy(1);
        strategy.add_deposits(&[1_000, 0, 0, 0]).unwrap();
        strategy.settle(&[RATE], 0).unwrap();

        // 100% yield doubles the position value, halving shares per asset
        strategy.add_deposits(&[1_000, 0, 0, 0]).unwrap();
        let settlement = strategy.settle(&[RATE], MAX_BPS as i64).unwrap();

        assert_eq!(settlement.value_before_deposits, 2_000 * RATE as u128);
        assert_eq!(settlement.shares_minted, 500 * INITIAL_SHARE_MULTIPLIER);
    }

    #[test]
    fn settlement_redeems_pending_shares_pro_rata() {
        let mut strategy = strategy(2);
        strategy.add_deposits(&[600, 400, 0, 0]).unwrap();
        strategy.settle(&[RATE, RATE], 0).unwrap();

        let total = strategy.total_shares;
        strategy.add_withdrawals(total / 2).unwrap();
        let settlement = strategy.settle(&[RATE, RATE], 0).unwrap();

        assert_eq!(settlement.shares_redeemed, total / 2);
        assert_eq!(settlement.assets_withdrawn[0], 300);
        assert_eq!(settlement.assets_withdrawn[1], 200);
        assert_eq!(strategy.total_shares, total - total / 2);
    }

    #[test]
    fn settlement_after_total_loss_reprices_from_scratch() {
        let mut strategy = strategy(1);
        strategy.add_deposits(&[1_000, 0, 0, 0]).unwrap();
        strategy.settle(&[RATE], 0).unwrap();

        // -100% wipes the position while its shares stay outstanding
        strategy.settle(&[RATE], -(MAX_BPS as i64)).unwrap();
        assert_eq!(strategy.balances[0], 0);
        assert!(strategy.total_shares > 0);

        strategy.add_deposits(&[500, 0, 0, 0]).unwrap();
        let settlement = strategy.settle(&[RATE], 0).unwrap();
        assert_eq!(settlement.shares_minted, 500 * INITIAL_SHARE_MULTIPLIER);
        assert_eq!(strategy.balances[0], 500);
    }

    #[test]
    fn redeem_fast_rejects_excess_shares() {
        let mut strategy = strategy(1);
        strategy.add_deposits(&[100, 0, 0, 0]).unwrap();
        strategy.settle(&[RATE], 0).unwrap();

        assert!(strategy.redeem_fast(strategy.total_shares + 1).is_err());
        let withdrawn = strategy.redeem_fast(strategy.total_shares).unwrap();
        assert_eq!(withdrawn[0], 100);
        assert_eq!(strategy.total_shares, 0);
    }

    #[test]
    fn removed_strategy_rejects_new_business() {
        let mut strategy = strategy(1);
        strategy.mark_removed();

        assert!(strategy.add_deposits(&[1, 0, 0, 0]).is_err());
        assert!(strategy.settle(&[RATE], 0).is_err());
        assert!(strategy.deposit_fast(&[1, 0, 0, 0], &[RATE]).is_err());
    }
}
