use anchor_lang::prelude::*;

use crate::constants::MAX_ASSETS;

#[event]
pub struct StrategyRegisteredEvent {
    pub strategy_key: Pubkey,
    pub index: u64,
    pub asset_group_id: u64,
    pub asset_ratio: [u64; MAX_ASSETS],
}

#[event]
pub struct StrategyRemovedEvent {
    pub strategy_key: Pubkey,
}

#[event]
pub struct DepositsAddedEvent {
    pub strategy_key: Pubkey,
    pub dhw_index: u64,
    pub amounts: [u64; MAX_ASSETS],
}

#[event]
pub struct WithdrawalsAddedEvent {
    pub strategy_key: Pubkey,
    pub dhw_index: u64,
    pub shares: u64,
}

#[event]
pub struct DoHardWorkEvent {
    pub strategy_key: Pubkey,
    pub dhw_index: u64,
    pub assets_deposited: [u64; MAX_ASSETS],
    pub shares_minted: u64,
    pub shares_redeemed: u64,
    pub assets_withdrawn: [u64; MAX_ASSETS],
    pub total_value_usd: u128,
    pub total_shares: u64,
    pub yield_bps: i64,
    pub timestamp: i64,
}

#[event]
pub struct StrategySharesFastRedeemedEvent {
    pub strategy_key: Pubkey,
    pub shares: u64,
    pub assets_withdrawn: [u64; MAX_ASSETS],
}

#[event]
pub struct StrategySharesFastDepositedEvent {
    pub strategy_key: Pubkey,
    pub shares: u64,
    pub assets_deposited: [u64; MAX_ASSETS],
}

#[event]
pub struct AssetsReleasedEvent {
    pub receiver: Pubkey,
    pub asset: Pubkey,
    pub amount: u64,
}

#[event]
pub struct PriceUpdatedEvent {
    pub asset: Pubkey,
    pub price: u64,
    pub timestamp: i64,
}
