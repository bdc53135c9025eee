use anchor_lang::prelude::*;

use crate::constants::{
    DEPOSIT_FEE_MAX_BPS, FULL_PERCENT, INITIAL_SHARE_MULTIPLIER, MANAGEMENT_FEE_MAX_BPS,
    MAX_ASSETS, MAX_STRATEGIES, PERFORMANCE_FEE_MAX_BPS, SECONDS_PER_YEAR, SMART_VAULT_SEED,
    USD_UNIT, WITHDRAWAL_NFT_BASE,
};
use crate::errors::ErrorCode;

/// One strategy slot of a vault. A slot whose key is the default pubkey is
/// unused; a ghost slot keeps its strategy-share balance but is excluded
/// from all new flush traffic.
#[derive(AnchorSerialize, AnchorDeserialize, InitSpace, Clone, Copy, Default, Debug)]
pub struct VaultStrategy {
    pub key: Pubkey,
    pub allocation_bps: u64,
    /// Strategy shares the vault holds, credited at deposit sync and burned
    /// at withdrawal flush.
    pub sst_balance: u64,
    pub is_ghost: bool,
}

impl VaultStrategy {
    pub fn in_use(&self) -> bool {
        self.key != Pubkey::default()
    }

    pub fn takes_traffic(&self) -> bool {
        self.in_use() && !self.is_ghost
    }
}

/// The vault ledger. Deposits and redemptions accumulate here between
/// flushes; a flush freezes them into a batch and a sync settles the batch
/// against the do-hard-work snapshots it was routed to.
#[account]
#[derive(Default, Debug, InitSpace)]
pub struct SmartVault {
    pub key: Pubkey,
    pub index: u64,
    pub index_buffer: [u8; 8],
    pub bump: u8,
    pub vault_authority_bump: u8,
    pub svt_mint_bump: u8,

    pub asset_group_id: u64,
    pub num_assets: u8,

    pub strategies: [VaultStrategy; MAX_STRATEGIES],
    pub num_strategies: u8,

    pub management_fee_bps: u64,
    pub deposit_fee_bps: u64,
    pub performance_fee_bps: u64,
    pub fee_receiver: Pubkey,

    /// Index the next flush will get. Starts at 1.
    pub current_flush_index: u64,
    /// Oldest flush not yet synced; equal to `current_flush_index` when the
    /// vault is fully caught up. At most one flush is ever in flight.
    pub to_sync_flush_index: u64,

    pub pending_deposits: [u64; MAX_ASSETS],
    pub pending_redeemed_svts: u64,

    pub total_svt_supply: u64,
    pub last_sync_timestamp: i64,

    pub next_deposit_nft_id: u64,
    pub next_withdrawal_nft_id: u64,

    pub guarded: bool,
    pub static_allocation: bool,
    pub is_shutdown: bool,
}

/// What one flush froze, in the shape the batch records it.
#[derive(Default, Debug, Clone, Copy)]
pub struct FlushData {
    pub flush_index: u64,
    pub deposited: [u64; MAX_ASSETS],
    pub redeemed_svts: u64,
    pub strategy_shares: [u64; MAX_STRATEGIES],
}

/// Result of settling one flush's deposits against the snapshots.
#[derive(Default, Debug, Clone, Copy)]
pub struct DepositSyncOutcome {
    /// SVTs claimable by this flush's depositors, net of the deposit fee.
    pub minted_svts: u64,
    pub deposit_fee_svts: u64,
    pub management_fee_svts: u64,
    pub performance_fee_svts: u64,
}

impl DepositSyncOutcome {
    pub fn fee_svts(&self) -> u64 {
        self.deposit_fee_svts + self.management_fee_svts + self.performance_fee_svts
    }
}

impl SmartVault {
    pub fn seeds(&self) -> [&[u8]; 3] {
        [
            SMART_VAULT_SEED.as_bytes(),
            self.index_buffer.as_ref(),
            std::slice::from_ref(&self.bump),
        ]
    }

    #[allow(clippy::too_many_arguments)]
    pub fn init(
        &mut self,
        key: Pubkey,
        index: u64,
        bump: u8,
        vault_authority_bump: u8,
        svt_mint_bump: u8,
        asset_group_id: u64,
        num_assets: u8,
        strategies: &[(Pubkey, u64)],
        management_fee_bps: u64,
        deposit_fee_bps: u64,
        performance_fee_bps: u64,
        fee_receiver: Pubkey,
        guarded: bool,
        static_allocation: bool,
    ) -> Result<()> {
        if strategies.is_empty() || strategies.len() > MAX_STRATEGIES {
            return Err(ErrorCode::InvalidStrategySet.into());
        }
        Self::validate_allocations(strategies.iter().map(|(_, bps)| *bps))?;
        Self::validate_fees(management_fee_bps, deposit_fee_bps, performance_fee_bps)?;

        self.key = key;
        self.index = index;
        self.index_buffer = index.to_le_bytes();
        self.bump = bump;
        self.vault_authority_bump = vault_authority_bump;
        self.svt_mint_bump = svt_mint_bump;
        self.asset_group_id = asset_group_id;
        self.num_assets = num_assets;

        for (slot, (strategy_key, allocation)) in strategies.iter().enumerate() {
            if *strategy_key == Pubkey::default() {
                return Err(ErrorCode::InvalidStrategySet.into());
            }
            if strategies[..slot].iter().any(|(key, _)| key == strategy_key) {
                return Err(ErrorCode::InvalidStrategySet.into());
            }
            self.strategies[slot] = VaultStrategy {
                key: *strategy_key,
                allocation_bps: *allocation,
                sst_balance: 0,
                is_ghost: false,
            };
        }
        self.num_strategies = strategies.len() as u8;

        self.management_fee_bps = management_fee_bps;
        self.deposit_fee_bps = deposit_fee_bps;
        self.performance_fee_bps = performance_fee_bps;
        self.fee_receiver = fee_receiver;

        self.current_flush_index = 1;
        self.to_sync_flush_index = 1;
        self.next_deposit_nft_id = 1;
        self.next_withdrawal_nft_id = WITHDRAWAL_NFT_BASE + 1;

        self.guarded = guarded;
        self.static_allocation = static_allocation;

        Ok(())
    }

    pub fn assets_len(&self) -> usize {
        self.num_assets as usize
    }

    pub fn assert_active(&self) -> Result<()> {
        if self.is_shutdown {
            return Err(ErrorCode::VaultShutdown.into());
        }
        Ok(())
    }

    pub fn strategy_slot(&self, key: &Pubkey) -> Result<usize> {
        self.strategies[..self.num_strategies as usize]
            .iter()
            .position(|s| s.key == *key)
            .ok_or_else(|| ErrorCode::InvalidStrategySet.into())
    }

    /// Slots that still take flush traffic, in slot order.
    pub fn traffic_slots(&self) -> Vec<usize> {
        (0..self.num_strategies as usize)
            .filter(|slot| self.strategies[*slot].takes_traffic())
            .collect()
    }

    pub fn traffic_weights(&self) -> Vec<u64> {
        self.traffic_slots()
            .iter()
            .map(|slot| self.strategies[*slot].allocation_bps)
            .collect()
    }

    pub fn add_pending_deposit(&mut self, amounts: &[u64]) -> Result<()> {
        self.assert_active()?;
        if amounts.len() != self.assets_len() || amounts.iter().all(|a| *a == 0) {
            return Err(ErrorCode::InvalidAssetList.into());
        }

        for (pending, amount) in self.pending_deposits.iter_mut().zip(amounts.iter()) {
            *pending += amount;
        }
        Ok(())
    }

    pub fn add_pending_redeem(&mut self, svt_shares: u64) -> Result<()> {
        if svt_shares == 0 {
            return Err(ErrorCode::ZeroValue.into());
        }

        self.pending_redeemed_svts += svt_shares;
        Ok(())
    }

    pub fn take_deposit_nft_id(&mut self) -> u64 {
        let id = self.next_deposit_nft_id;
        self.next_deposit_nft_id += 1;
        id
    }

    pub fn take_withdrawal_nft_id(&mut self) -> u64 {
        let id = self.next_withdrawal_nft_id;
        self.next_withdrawal_nft_id += 1;
        id
    }

    /// Freezes everything accumulated since the previous flush. Queued SVT
    /// redemptions are burned here and converted into strategy-share
    /// withdrawals against each live strategy, pro rata to the vault's
    /// holdings. The previous flush must be fully synced first.
    pub fn begin_flush(&mut self) -> Result<FlushData> {
        if self.to_sync_flush_index != self.current_flush_index {
            return Err(ErrorCode::FlushNotSynced.into());
        }

        let has_deposits = self.pending_deposits.iter().any(|a| *a > 0);
        let redeemed_svts = self.pending_redeemed_svts;
        if !has_deposits && redeemed_svts == 0 {
            return Err(ErrorCode::NothingToFlush.into());
        }
        if has_deposits && self.traffic_slots().is_empty() {
            return Err(ErrorCode::InvalidStrategySet.into());
        }

        let mut strategy_shares = [0u64; MAX_STRATEGIES];
        if redeemed_svts > 0 {
            if redeemed_svts > self.total_svt_supply {
                return Err(ErrorCode::InsufficientShares.into());
            }
            for slot in self.traffic_slots() {
                let strategy = &mut self.strategies[slot];
                let shares = (strategy.sst_balance as u128 * redeemed_svts as u128
                    / self.total_svt_supply as u128) as u64;
                strategy.sst_balance -= shares;
                strategy_shares[slot] = shares;
            }
            self.total_svt_supply -= redeemed_svts;
        }

        let data = FlushData {
            flush_index: self.current_flush_index,
            deposited: self.pending_deposits,
            redeemed_svts,
            strategy_shares,
        };

        self.pending_deposits = [0; MAX_ASSETS];
        self.pending_redeemed_svts = 0;
        self.current_flush_index += 1;

        Ok(data)
    }

    /// Converts an immediate redemption into per-slot strategy shares, all
    /// priced at the pre-burn supply so a full exit collects every live
    /// strategy's pro-rata cut. Burns the SVTs from the supply.
    pub fn begin_fast_redeem(&mut self, svt_shares: u64) -> Result<Vec<(usize, u64)>> {
        if svt_shares == 0 || svt_shares > self.total_svt_supply {
            return Err(ErrorCode::InsufficientShares.into());
        }

        let supply = self.total_svt_supply;
        let mut redemptions = Vec::new();
        for slot in self.traffic_slots() {
            let strategy = &mut self.strategies[slot];
            let shares =
                (strategy.sst_balance as u128 * svt_shares as u128 / supply as u128) as u64;
            if shares > 0 {
                strategy.sst_balance -= shares;
                redemptions.push((slot, shares));
            }
        }
        if redemptions.is_empty() {
            return Err(ErrorCode::ZeroValue.into());
        }

        self.total_svt_supply -= svt_shares;
        Ok(redemptions)
    }

    pub fn assert_sync_pending(&self) -> Result<()> {
        if self.to_sync_flush_index >= self.current_flush_index {
            return Err(ErrorCode::NothingToSync.into());
        }
        Ok(())
    }

    pub fn credit_sst(&mut self, slot: usize, shares: u64) {
        self.strategies[slot].sst_balance += shares;
    }

    /// Settles the deposit side of the in-flight flush. `deposited_usd` and
    /// `value_before_usd` are priced at the snapshots' own exchange rates;
    /// `yield_usd` is the settled gain on the vault's pre-existing strategy
    /// shares. Fees dilute: fee SVTs are minted on top of the depositors'
    /// cut. Management and performance fees accrue once per sync.
    pub fn settle_deposit_sync(
        &mut self,
        deposited_usd: u128,
        value_before_usd: u128,
        yield_usd: u128,
        now: i64,
    ) -> DepositSyncOutcome {
        let supply_before = self.total_svt_supply;

        let gross_minted = if deposited_usd == 0 {
            0
        } else if supply_before == 0 || value_before_usd == 0 {
            (deposited_usd * INITIAL_SHARE_MULTIPLIER as u128 / USD_UNIT as u128) as u64
        } else {
            (deposited_usd * supply_before as u128 / value_before_usd) as u64
        };

        let deposit_fee_svts =
            (gross_minted as u128 * self.deposit_fee_bps as u128 / FULL_PERCENT as u128) as u64;
        let management_fee_svts = self.accrued_management_fee(now);
        let performance_fee_svts =
            self.performance_fee_svts(yield_usd, supply_before, value_before_usd);

        self.total_svt_supply = supply_before
            + gross_minted
            + management_fee_svts
            + performance_fee_svts;
        self.last_sync_timestamp = now;

        DepositSyncOutcome {
            minted_svts: gross_minted - deposit_fee_svts,
            deposit_fee_svts,
            management_fee_svts,
            performance_fee_svts,
        }
    }

    pub fn advance_sync(&mut self) {
        self.to_sync_flush_index += 1;
    }

    pub fn mark_strategy_ghost(&mut self, key: &Pubkey) -> Result<()> {
        let slot = self.strategy_slot(key)?;
        let strategy = &mut self.strategies[slot];
        if strategy.is_ghost {
            return Err(ErrorCode::GhostStrategy.into());
        }

        strategy.is_ghost = true;
        strategy.allocation_bps = 0;
        Ok(())
    }

    pub fn reallocate(&mut self, allocations: &[u64]) -> Result<()> {
        self.assert_active()?;
        if self.static_allocation {
            return Err(ErrorCode::StaticAllocationVault.into());
        }
        if allocations.len() != self.num_strategies as usize {
            return Err(ErrorCode::InvalidAllocation.into());
        }
        Self::validate_allocations(allocations.iter().copied())?;

        for (slot, allocation) in allocations.iter().enumerate() {
            let strategy = &mut self.strategies[slot];
            if strategy.is_ghost && *allocation > 0 {
                return Err(ErrorCode::GhostStrategy.into());
            }
            strategy.allocation_bps = *allocation;
        }
        Ok(())
    }

    pub fn shutdown(&mut self) -> Result<()> {
        self.assert_active()?;
        self.is_shutdown = true;
        Ok(())
    }

    pub fn validate_fees(management: u64, deposit: u64, performance: u64) -> Result<()> {
        if management > MANAGEMENT_FEE_MAX_BPS
            || deposit > DEPOSIT_FEE_MAX_BPS
            || performance > PERFORMANCE_FEE_MAX_BPS
        {
            return Err(ErrorCode::FeeTooHigh.into());
        }
        Ok(())
    }

    fn validate_allocations(allocations: impl Iterator<Item = u64>) -> Result<()> {
        if allocations.sum::<u64>() != FULL_PERCENT {
            return Err(ErrorCode::InvalidAllocation.into());
        }
        Ok(())
    }

    /// Pro-rated supply dilution since the previous sync.
    fn accrued_management_fee(&self, now: i64) -> u64 {
        if self.management_fee_bps == 0 || self.last_sync_timestamp == 0 {
            return 0;
        }

        let elapsed = now.saturating_sub(self.last_sync_timestamp).max(0) as u128;
        (self.total_svt_supply as u128 * self.management_fee_bps as u128 * elapsed
            / (FULL_PERCENT as u128 * SECONDS_PER_YEAR as u128)) as u64
    }

    fn performance_fee_svts(&self, yield_usd: u128, supply: u64, value_usd: u128) -> u64 {
        if self.performance_fee_bps == 0 || yield_usd == 0 || supply == 0 || value_usd == 0 {
            return 0;
        }

        let fee_usd = yield_usd * self.performance_fee_bps as u128 / FULL_PERCENT as u128;
        (fee_usd * supply as u128 / value_usd) as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vault() -> SmartVault {
        vault_with_fees(0, 0, 0)
    }

    fn vault_with_fees(management: u64, deposit: u64, performance: u64) -> SmartVault {
        let mut vault = SmartVault::default();
        vault
            .init(
                Pubkey::new_unique(),
                0,
                255,
                254,
                253,
                1,
                1,
                &[(Pubkey::new_unique(), 7_000), (Pubkey::new_unique(), 3_000)],
                management,
                deposit,
                performance,
                Pubkey::new_unique(),
                false,
                false,
            )
            .unwrap();
        vault
    }

    #[test]
    fn receipt_id_ranges_never_overlap() {
        let mut vault = vault();

        assert_eq!(vault.take_deposit_nft_id(), 1);
        assert_eq!(vault.take_deposit_nft_id(), 2);
        assert_eq!(vault.take_withdrawal_nft_id(), WITHDRAWAL_NFT_BASE + 1);
        assert!(vault.next_deposit_nft_id < WITHDRAWAL_NFT_BASE);
    }

    #[test]
    fn flush_requires_previous_sync() {
        let mut vault = vault();
        vault.add_pending_deposit(&[1_000]).unwrap();

        let data = vault.begin_flush().unwrap();
        assert_eq!(data.flush_index, 1);
        assert_eq!(data.deposited[0], 1_000);
        assert_eq!(vault.current_flush_index, 2);
        assert_eq!(vault.pending_deposits[0], 0);

        // second flush is blocked until flush 1 is synced
        vault.add_pending_deposit(&[500]).unwrap();
        assert!(vault.begin_flush().is_err());

        vault.assert_sync_pending().unwrap();
        vault.advance_sync();
        assert!(vault.begin_flush().is_ok());
        assert!(vault.assert_sync_pending().is_ok());
    }

    #[test]
    fn empty_flush_is_rejected() {
        let mut vault = vault();
        assert!(vault.begin_flush().is_err());
    }

    #[test]
    fn sync_without_flight_is_a_no_op() {
        let vault = vault();
        assert!(vault.assert_sync_pending().is_err());
    }

    #[test]
    fn first_sync_bootstraps_svt_supply() {
        let mut vault = vault();
        vault.add_pending_deposit(&[1_000]).unwrap();
        vault.begin_flush().unwrap();

        let outcome =
            vault.settle_deposit_sync(1_000 * USD_UNIT as u128, 0, 0, 1_700_000_000);

        assert_eq!(outcome.minted_svts, 1_000 * INITIAL_SHARE_MULTIPLIER);
        assert_eq!(outcome.fee_svts(), 0);
        assert_eq!(vault.total_svt_supply, 1_000 * INITIAL_SHARE_MULTIPLIER);
    }

    #[test]
    fn later_syncs_mint_proportionally_to_value() {
        let mut vault = vault();
        vault.settle_deposit_sync(1_000 * USD_UNIT as u128, 0, 0, 1_000);
        let supply = vault.total_svt_supply;

        // vault value doubled since, so the same deposit mints half the SVTs
        let outcome = vault.settle_deposit_sync(
            1_000 * USD_UNIT as u128,
            2_000 * USD_UNIT as u128,
            0,
            2_000,
        );

        assert_eq!(outcome.minted_svts, supply / 2);
    }

    #[test]
    fn management_fee_accrues_over_elapsed_time() {
        let mut vault = vault_with_fees(2_00, 0, 0);
        vault.total_svt_supply = 1_000;
        vault.last_sync_timestamp = 1_000;

        let outcome = vault.settle_deposit_sync(0, 1_000 * USD_UNIT as u128, 0, 1_000 + SECONDS_PER_YEAR);

        // 2% of 1_000 SVTs over exactly one year
        assert_eq!(outcome.management_fee_svts, 20);
        assert_eq!(vault.total_svt_supply, 1_020);
    }

    #[test]
    fn first_sync_accrues_no_management_fee() {
        let mut vault = vault_with_fees(2_00, 0, 0);

        let outcome = vault.settle_deposit_sync(1_000 * USD_UNIT as u128, 0, 0, 5_000);

        assert_eq!(outcome.management_fee_svts, 0);
        assert_eq!(vault.last_sync_timestamp, 5_000);
    }

    #[test]
    fn deposit_fee_is_carved_out_of_minted_svts() {
        let mut vault = vault_with_fees(0, 1_00, 0);

        let outcome =
            vault.settle_deposit_sync(1_000 * USD_UNIT as u128, 0, 0, 1_000);

        assert_eq!(outcome.deposit_fee_svts, 10 * INITIAL_SHARE_MULTIPLIER);
        assert_eq!(outcome.minted_svts, 990 * INITIAL_SHARE_MULTIPLIER);
        // the fee dilutes, it does not inflate
        assert_eq!(vault.total_svt_supply, 1_000 * INITIAL_SHARE_MULTIPLIER);
    }

    #[test]
    fn performance_fee_takes_a_cut_of_settled_yield() {
        let mut vault = vault_with_fees(0, 0, 10_00);
        vault.total_svt_supply = 1_000_000;
        vault.last_sync_timestamp = 1_000;

        // 100 USD of yield on a 1_100 USD vault, 10% fee
        let outcome = vault.settle_deposit_sync(
            0,
            1_100 * USD_UNIT as u128,
            100 * USD_UNIT as u128,
            2_000,
        );

        // 10 USD worth of SVTs at the pre-deposit share price
        assert_eq!(
            outcome.performance_fee_svts,
            (10u128 * USD_UNIT as u128 * 1_000_000 / (1_100 * USD_UNIT as u128)) as u64
        );
    }

    #[test]
    fn flush_converts_redeemed_svts_to_strategy_shares() {
        let mut vault = vault();
        vault.total_svt_supply = 1_000;
        vault.strategies[0].sst_balance = 700;
        vault.strategies[1].sst_balance = 300;

        vault.add_pending_redeem(250).unwrap();
        let data = vault.begin_flush().unwrap();

        assert_eq!(data.redeemed_svts, 250);
        assert_eq!(data.strategy_shares[0], 175);
        assert_eq!(data.strategy_shares[1], 75);
        assert_eq!(vault.total_svt_supply, 750);
        assert_eq!(vault.strategies[0].sst_balance, 525);
    }

    #[test]
    fn fast_redeem_collects_every_strategy_at_the_pre_burn_supply() {
        let mut vault = vault();
        vault.total_svt_supply = 1_000;
        vault.strategies[0].sst_balance = 500;
        vault.strategies[1].sst_balance = 500;

        // 100 of 1_000 SVTs is a 10% cut of both positions, not just one
        let redemptions = vault.begin_fast_redeem(100).unwrap();
        assert_eq!(redemptions, vec![(0, 50), (1, 50)]);
        assert_eq!(vault.total_svt_supply, 900);
        assert_eq!(vault.strategies[0].sst_balance, 450);
        assert_eq!(vault.strategies[1].sst_balance, 450);

        // a follow-up full exit still redeems at the same share value
        let rest = vault.begin_fast_redeem(900).unwrap();
        assert_eq!(rest, vec![(0, 450), (1, 450)]);
        assert_eq!(vault.total_svt_supply, 0);
    }

    #[test]
    fn fast_redeem_rejects_excess_and_valueless_exits() {
        let mut vault = vault();
        vault.total_svt_supply = 1_000;
        vault.strategies[0].sst_balance = 500;

        assert!(vault.begin_fast_redeem(1_001).is_err());
        assert!(vault.begin_fast_redeem(0).is_err());

        // a dust exit that rounds to zero shares everywhere burns nothing
        assert!(vault.begin_fast_redeem(1).is_err());
        assert_eq!(vault.total_svt_supply, 1_000);
        assert_eq!(vault.strategies[0].sst_balance, 500);
    }

    #[test]
    fn duplicate_strategies_are_rejected_at_registration() {
        let duplicate = Pubkey::new_unique();
        let mut vault = SmartVault::default();

        let err = vault
            .init(
                Pubkey::new_unique(),
                0,
                255,
                254,
                253,
                1,
                1,
                &[(duplicate, 7_000), (duplicate, 3_000)],
                0,
                0,
                0,
                Pubkey::new_unique(),
                false,
                false,
            )
            .unwrap_err();
        assert_eq!(err, ErrorCode::InvalidStrategySet.into());
    }

    #[test]
    fn caught_up_vault_reports_nothing_to_sync() {
        let vault = vault();
        assert_eq!(
            vault.assert_sync_pending().unwrap_err(),
            ErrorCode::NothingToSync.into()
        );
    }

    #[test]
    fn ghost_strategies_are_excluded_from_traffic() {
        let mut vault = vault();
        let ghost = vault.strategies[0].key;
        vault.mark_strategy_ghost(&ghost).unwrap();

        assert_eq!(vault.traffic_slots(), vec![1]);
        assert_eq!(vault.strategies[0].allocation_bps, 0);
        assert!(vault.mark_strategy_ghost(&ghost).is_err());
    }

    #[test]
    fn reallocation_validates_the_new_weights() {
        let mut vault = vault();

        assert!(vault.reallocate(&[5_000, 5_000]).is_ok());
        assert!(vault.reallocate(&[5_000, 4_999]).is_err());

        let ghost = vault.strategies[1].key;
        vault.mark_strategy_ghost(&ghost).unwrap();
        assert!(vault.reallocate(&[5_000, 5_000]).is_err());
        assert!(vault.reallocate(&[10_000, 0]).is_ok());
    }

    #[test]
    fn shutdown_blocks_deposits_but_not_redemptions() {
        let mut vault = vault();
        vault.total_svt_supply = 1_000;
        vault.strategies[0].sst_balance = 1_000;
        vault.shutdown().unwrap();

        assert!(vault.add_pending_deposit(&[100]).is_err());
        assert!(vault.add_pending_redeem(100).is_ok());
        assert!(vault.begin_flush().is_ok());
        assert!(vault.shutdown().is_err());
    }

    #[test]
    fn fee_caps_are_enforced() {
        assert!(SmartVault::validate_fees(5_00, 5_00, 20_00).is_ok());
        assert!(SmartVault::validate_fees(5_01, 0, 0).is_err());
        assert!(SmartVault::validate_fees(0, 5_01, 0).is_err());
        assert!(SmartVault::validate_fees(0, 0, 20_01).is_err());
    }
}
