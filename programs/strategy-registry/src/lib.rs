pub mod constants;
pub mod errors;
pub mod events;
pub mod instructions;
pub mod state;
pub mod utils;

use anchor_lang::prelude::*;

pub use constants::*;
pub use instructions::*;
pub use state::*;

declare_id!("RegS2vJR8yhoBVPNuZMEsfSF27kEb5zBqT9hPHneofH");

#[program]
pub mod strategy_registry {
    use super::*;

    pub fn initialize(
        ctx: Context<Initialize>,
        vault_manager: Pubkey,
        price_max_age: i64,
    ) -> Result<()> {
        handle_initialize(ctx, vault_manager, price_max_age)
    }

    pub fn set_role(ctx: Context<SetRole>, user: Pubkey, role: Role) -> Result<()> {
        handle_set_role(ctx, user, role)
    }

    pub fn drop_role(ctx: Context<SetRole>, user: Pubkey, role: Role) -> Result<()> {
        handle_drop_role(ctx, user, role)
    }

    pub fn register_asset_group(
        ctx: Context<RegisterAssetGroup>,
        id: u64,
        assets: Vec<Pubkey>,
    ) -> Result<()> {
        handle_register_asset_group(ctx, id, assets)
    }

    pub fn set_price(ctx: Context<SetPrice>, price: u64) -> Result<()> {
        handle_set_price(ctx, price)
    }

    pub fn init_master_wallet(ctx: Context<InitMasterWallet>) -> Result<()> {
        handle_init_master_wallet(ctx)
    }

    pub fn register_strategy(
        ctx: Context<RegisterStrategy>,
        asset_ratio: Vec<u64>,
    ) -> Result<()> {
        handle_register_strategy(ctx, asset_ratio)
    }

    pub fn init_strategy_wallet(ctx: Context<InitStrategyWallet>) -> Result<()> {
        handle_init_strategy_wallet(ctx)
    }

    pub fn remove_strategy(ctx: Context<RemoveStrategy>) -> Result<()> {
        handle_remove_strategy(ctx)
    }

    pub fn add_deposits(
        ctx: Context<AddDeposits>,
        amounts: [u64; MAX_ASSETS],
    ) -> Result<u64> {
        handle_add_deposits(ctx, amounts)
    }

    pub fn add_withdrawals(ctx: Context<AddWithdrawals>, shares: u64) -> Result<u64> {
        handle_add_withdrawals(ctx, shares)
    }

    pub fn do_hard_work<'info>(
        ctx: Context<'_, '_, 'info, 'info, DoHardWork<'info>>,
        dhw_index: u64,
        rate_slippages: [[u64; 2]; MAX_ASSETS],
        base_yield_bps: i64,
    ) -> Result<()> {
        handle_do_hard_work(ctx, dhw_index, rate_slippages, base_yield_bps)
    }

    pub fn redeem_fast<'info>(
        ctx: Context<'_, '_, 'info, 'info, RedeemFast<'info>>,
        shares: u64,
        withdrawal_slippages: [u64; MAX_ASSETS],
        rate_slippages: [[u64; 2]; MAX_ASSETS],
    ) -> Result<[u64; MAX_ASSETS]> {
        handle_redeem_fast(ctx, shares, withdrawal_slippages, rate_slippages)
    }

    pub fn deposit_fast<'info>(
        ctx: Context<'_, '_, 'info, 'info, DepositFast<'info>>,
        amounts: [u64; MAX_ASSETS],
        rate_slippages: [[u64; 2]; MAX_ASSETS],
    ) -> Result<u64> {
        handle_deposit_fast(ctx, amounts, rate_slippages)
    }

    pub fn release_assets(ctx: Context<ReleaseAssets>, amount: u64) -> Result<()> {
        handle_release_assets(ctx, amount)
    }
}
