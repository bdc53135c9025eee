use anchor_lang::prelude::*;

use strategy_registry::state::oracle::usd_value_bulk;

use crate::constants::{FLUSH_DISTRIBUTION_LEN, MAX_ASSETS, MAX_STRATEGIES, NFT_UNIT};
use crate::errors::ErrorCode;
use crate::state::vault::FlushData;

/// Frozen record of one flush. Written at flush time, completed at sync
/// time, then only ever read by receipt claims. Receipts of this flush are
/// settled against the numbers here, never against live vault state.
#[account]
#[derive(Default, Debug, InitSpace)]
pub struct FlushBatch {
    pub vault: Pubkey,
    pub flush_index: u64,
    pub bump: u8,

    pub deposited: [u64; MAX_ASSETS],
    /// Per-strategy asset routing, flattened slot-major.
    pub distributed: [u64; FLUSH_DISTRIBUTION_LEN],
    /// Do-hard-work index each routed strategy assigned to this flush; zero
    /// for slots the flush did not touch.
    pub dhw_indexes: [u64; MAX_STRATEGIES],
    /// Exchange rates frozen when the flush routed its deposits. Claim
    /// previews of every receipt in the batch price at these.
    pub exchange_rates: [u64; MAX_ASSETS],

    pub minted_svts: u64,
    pub deposits_synced: bool,

    pub redeemed_svt_shares: u64,
    pub strategy_shares: [u64; MAX_STRATEGIES],
    pub withdrawn_assets: [u64; MAX_ASSETS],
    pub withdrawals_synced: bool,
}

impl FlushBatch {
    pub fn record_flush(&mut self, vault: Pubkey, bump: u8, data: &FlushData) {
        self.vault = vault;
        self.flush_index = data.flush_index;
        self.bump = bump;
        self.deposited = data.deposited;
        self.redeemed_svt_shares = data.redeemed_svts;
        self.strategy_shares = data.strategy_shares;
    }

    pub fn set_distribution(&mut self, slot: usize, amounts: &[u64; MAX_ASSETS]) {
        let base = slot * MAX_ASSETS;
        self.distributed[base..base + MAX_ASSETS].copy_from_slice(amounts);
    }

    pub fn distribution(&self, slot: usize) -> [u64; MAX_ASSETS] {
        let base = slot * MAX_ASSETS;
        let mut amounts = [0u64; MAX_ASSETS];
        amounts.copy_from_slice(&self.distributed[base..base + MAX_ASSETS]);
        amounts
    }

    pub fn set_dhw_index(&mut self, slot: usize, dhw_index: u64) {
        self.dhw_indexes[slot] = dhw_index;
    }

    pub fn set_exchange_rates(&mut self, rates: &[u64]) {
        self.exchange_rates[..rates.len()].copy_from_slice(rates);
    }

    pub fn has_deposits(&self) -> bool {
        self.deposited.iter().any(|a| *a > 0)
    }

    pub fn has_withdrawals(&self) -> bool {
        self.redeemed_svt_shares > 0
    }

    pub fn record_deposit_sync(&mut self, minted_svts: u64) {
        self.minted_svts = minted_svts;
        self.deposits_synced = true;
    }

    pub fn record_withdrawal_sync(&mut self, withdrawn: [u64; MAX_ASSETS]) {
        self.withdrawn_assets = withdrawn;
        self.withdrawals_synced = true;
    }

    pub fn synced(&self) -> bool {
        (!self.has_deposits() || self.deposits_synced)
            && (!self.has_withdrawals() || self.withdrawals_synced)
    }

    /// SVTs a deposit receipt over `amounts` can claim, for `fraction` of
    /// the receipt in NFT_UNIT terms. Priced at the batch's flush-time
    /// rates; rounds down.
    pub fn claim_svts(&self, amounts: &[u64], fraction: u64) -> Result<u64> {
        if !self.deposits_synced {
            return Err(ErrorCode::DepositNotSyncedYet.into());
        }

        let num_assets = amounts.len();
        let user_usd = usd_value_bulk(amounts, &self.exchange_rates[..num_assets]);
        let total_usd = usd_value_bulk(&self.deposited[..num_assets], &self.exchange_rates[..num_assets]);
        if user_usd > total_usd {
            return Err(ErrorCode::InsufficientShares.into());
        }

        let full_cut = crate::math::proportion(self.minted_svts, user_usd, total_usd);
        Ok((full_cut as u128 * fraction as u128 / NFT_UNIT as u128) as u64)
    }

    /// Assets a withdrawal receipt over `svt_shares` can claim, for
    /// `fraction` of the receipt. Pro rata against everything this flush
    /// withdrew; rounds down.
    pub fn claim_assets(&self, svt_shares: u64, fraction: u64) -> Result<[u64; MAX_ASSETS]> {
        if !self.withdrawals_synced {
            return Err(ErrorCode::WithdrawalNotSyncedYet.into());
        }
        if svt_shares > self.redeemed_svt_shares {
            return Err(ErrorCode::InsufficientShares.into());
        }

        let mut amounts = [0u64; MAX_ASSETS];
        for (i, withdrawn) in self.withdrawn_assets.iter().enumerate() {
            let full_cut = (*withdrawn as u128 * svt_shares as u128
                / self.redeemed_svt_shares as u128) as u64;
            amounts[i] = (full_cut as u128 * fraction as u128 / NFT_UNIT as u128) as u64;
        }
        Ok(amounts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::USD_UNIT;

    fn synced_batch() -> FlushBatch {
        let mut batch = FlushBatch::default();
        batch.record_flush(
            Pubkey::new_unique(),
            255,
            &FlushData {
                flush_index: 1,
                deposited: [1_000, 0, 0, 0],
                redeemed_svts: 500,
                strategy_shares: [300, 200, 0, 0, 0, 0, 0, 0],
            },
        );
        batch.set_exchange_rates(&[USD_UNIT]);
        batch.record_deposit_sync(1_000_000);
        batch.record_withdrawal_sync([250, 0, 0, 0]);
        batch
    }

    #[test]
    fn deposit_claims_split_by_contributed_usd() {
        let batch = synced_batch();

        assert_eq!(batch.claim_svts(&[400], NFT_UNIT).unwrap(), 400_000);
        assert_eq!(batch.claim_svts(&[600], NFT_UNIT).unwrap(), 600_000);
        assert!(batch.claim_svts(&[1_001], NFT_UNIT).is_err());
    }

    #[test]
    fn fractional_deposit_claims_scale_linearly() {
        let batch = synced_batch();

        let half = batch.claim_svts(&[400], NFT_UNIT / 2).unwrap();
        assert_eq!(half, 200_000);
    }

    #[test]
    fn claims_before_sync_are_rejected() {
        let mut batch = synced_batch();
        batch.deposits_synced = false;
        batch.withdrawals_synced = false;

        assert!(batch.claim_svts(&[400], NFT_UNIT).is_err());
        assert!(batch.claim_assets(100, NFT_UNIT).is_err());
    }

    #[test]
    fn withdrawal_claims_are_pro_rata_in_every_asset() {
        let batch = synced_batch();

        let amounts = batch.claim_assets(100, NFT_UNIT).unwrap();
        assert_eq!(amounts[0], 50);
        assert!(batch.claim_assets(501, NFT_UNIT).is_err());
    }

    #[test]
    fn claims_price_at_the_rates_frozen_at_flush_time() {
        let mut batch = FlushBatch::default();
        batch.record_flush(
            Pubkey::new_unique(),
            255,
            &FlushData {
                flush_index: 1,
                deposited: [1_000, 500, 0, 0],
                redeemed_svts: 0,
                strategy_shares: [0; 8],
            },
        );
        batch.set_exchange_rates(&[2 * USD_UNIT, USD_UNIT]);
        batch.record_deposit_sync(1_000_000);

        // sync does not reprice the batch
        assert_eq!(batch.exchange_rates[..2], [2 * USD_UNIT, USD_UNIT]);

        // 1_000 @ 2.00 and 500 @ 1.00 give an 80/20 USD split
        assert_eq!(batch.claim_svts(&[1_000, 0], NFT_UNIT).unwrap(), 800_000);
        assert_eq!(batch.claim_svts(&[0, 500], NFT_UNIT).unwrap(), 200_000);
    }

    #[test]
    fn distribution_round_trips_by_slot() {
        let mut batch = FlushBatch::default();
        batch.set_distribution(2, &[7, 8, 9, 0]);

        assert_eq!(batch.distribution(2), [7, 8, 9, 0]);
        assert_eq!(batch.distribution(0), [0, 0, 0, 0]);
    }

    #[test]
    fn synced_tracks_both_sides_independently() {
        let mut batch = synced_batch();
        assert!(batch.synced());

        batch.withdrawals_synced = false;
        assert!(!batch.synced());

        batch.redeemed_svt_shares = 0;
        assert!(batch.synced());
    }
}
