use anchor_lang::prelude::*;

use crate::constants::{MAX_ASSETS, MAX_STRATEGIES};

#[event]
pub struct VaultRegisteredEvent {
    pub vault_key: Pubkey,
    pub index: u64,
    pub asset_group_id: u64,
    pub num_strategies: u8,
    pub management_fee_bps: u64,
    pub deposit_fee_bps: u64,
    pub performance_fee_bps: u64,
}

#[event]
pub struct VaultDepositEvent {
    pub vault_key: Pubkey,
    pub depositor: Pubkey,
    pub receiver: Pubkey,
    pub referral: Pubkey,
    pub nft_id: u64,
    pub flush_index: u64,
    pub amounts: [u64; MAX_ASSETS],
    pub timestamp: i64,
}

#[event]
pub struct VaultRedeemEvent {
    pub vault_key: Pubkey,
    pub redeemer: Pubkey,
    pub nft_id: u64,
    pub flush_index: u64,
    pub svt_shares: u64,
}

#[event]
pub struct VaultRedeemFastEvent {
    pub vault_key: Pubkey,
    pub redeemer: Pubkey,
    pub svt_shares: u64,
    pub assets_withdrawn: [u64; MAX_ASSETS],
}

#[event]
pub struct VaultFlushedEvent {
    pub vault_key: Pubkey,
    pub flush_index: u64,
    pub deposited: [u64; MAX_ASSETS],
    pub redeemed_svt_shares: u64,
    pub dhw_indexes: [u64; MAX_STRATEGIES],
}

#[event]
pub struct DepositsSyncedEvent {
    pub vault_key: Pubkey,
    pub flush_index: u64,
    pub minted_svts: u64,
    pub deposit_fee_svts: u64,
    pub management_fee_svts: u64,
    pub performance_fee_svts: u64,
}

#[event]
pub struct WithdrawalsSyncedEvent {
    pub vault_key: Pubkey,
    pub flush_index: u64,
    pub withdrawn_assets: [u64; MAX_ASSETS],
}

#[event]
pub struct VaultTokensClaimedEvent {
    pub vault_key: Pubkey,
    pub claimer: Pubkey,
    pub nft_id: u64,
    pub claimed_svts: u64,
    pub burned_balance: u64,
}

#[event]
pub struct WithdrawalClaimedEvent {
    pub vault_key: Pubkey,
    pub claimer: Pubkey,
    pub receiver: Pubkey,
    pub nft_id: u64,
    pub amounts: [u64; MAX_ASSETS],
    pub burned_balance: u64,
}

#[event]
pub struct VaultReallocatedEvent {
    pub vault_key: Pubkey,
    pub allocations: [u64; MAX_STRATEGIES],
}

#[event]
pub struct VaultAccessUpdatedEvent {
    pub vault_key: Pubkey,
    pub account: Pubkey,
    pub allowed_requests: u8,
}

#[event]
pub struct VaultShutdownEvent {
    pub vault_key: Pubkey,
}

#[event]
pub struct VaultStrategyRemovedEvent {
    pub vault_key: Pubkey,
    pub strategy_key: Pubkey,
}
