pub mod constants;
pub mod errors;
pub mod events;
pub mod instructions;
pub mod math;
pub mod state;
pub mod utils;

use anchor_lang::prelude::*;

pub use constants::*;
pub use instructions::*;
pub use state::*;

declare_id!("SVLTmgk2g5qvJcnLvfnWAsFyDxAKkGKW4AGhYYfvSw9");

#[program]
pub mod smart_vault {
    use super::*;

    pub fn initialize(ctx: Context<Initialize>, registry_config: Pubkey) -> Result<()> {
        handle_initialize(ctx, registry_config)
    }

    pub fn set_role(ctx: Context<SetRole>, user: Pubkey, role: Role) -> Result<()> {
        handle_set_role(ctx, user, role)
    }

    pub fn drop_role(ctx: Context<SetRole>, user: Pubkey, role: Role) -> Result<()> {
        handle_drop_role(ctx, user, role)
    }

    pub fn register_vault<'info>(
        ctx: Context<'_, '_, 'info, 'info, RegisterVault<'info>>,
        allocations: Vec<u64>,
        settings: VaultSettings,
    ) -> Result<()> {
        handle_register_vault(ctx, allocations, settings)
    }

    pub fn deposit<'info>(
        ctx: Context<'_, '_, 'info, 'info, Deposit<'info>>,
        amounts: Vec<u64>,
        referral: Pubkey,
    ) -> Result<()> {
        handle_deposit(ctx, amounts, referral)
    }

    pub fn redeem(ctx: Context<Redeem>, svt_shares: u64) -> Result<()> {
        handle_redeem(ctx, svt_shares)
    }

    pub fn redeem_fast<'info>(
        ctx: Context<'_, '_, '_, 'info, RedeemFast<'info>>,
        svt_shares: u64,
        withdrawal_slippages: [u64; MAX_ASSETS],
        rate_slippages: [[u64; 2]; MAX_ASSETS],
    ) -> Result<()> {
        handle_redeem_fast(ctx, svt_shares, withdrawal_slippages, rate_slippages)
    }

    pub fn flush_vault<'info>(
        ctx: Context<'_, '_, 'info, 'info, FlushVault<'info>>,
    ) -> Result<()> {
        handle_flush_vault(ctx)
    }

    pub fn sync_vault<'info>(
        ctx: Context<'_, '_, 'info, 'info, SyncVault<'info>>,
        revert_if_nothing_to_sync: bool,
    ) -> Result<()> {
        handle_sync_vault(ctx, revert_if_nothing_to_sync)
    }

    pub fn claim_vault_tokens(ctx: Context<ClaimVaultTokens>, fraction: u64) -> Result<()> {
        handle_claim_vault_tokens(ctx, fraction)
    }

    pub fn claim_withdrawal<'info>(
        ctx: Context<'_, '_, '_, 'info, ClaimWithdrawal<'info>>,
        fraction: u64,
    ) -> Result<()> {
        handle_claim_withdrawal(ctx, fraction)
    }

    pub fn reallocate(ctx: Context<Reallocate>, allocations: Vec<u64>) -> Result<()> {
        handle_reallocate(ctx, allocations)
    }

    pub fn rebalance<'info>(
        ctx: Context<'_, '_, '_, 'info, Rebalance<'info>>,
        shares: u64,
        rate_slippages: [[u64; 2]; MAX_ASSETS],
    ) -> Result<()> {
        handle_rebalance(ctx, shares, rate_slippages)
    }

    pub fn set_vault_access(
        ctx: Context<SetVaultAccess>,
        account: Pubkey,
        allowed_requests: u8,
    ) -> Result<()> {
        handle_set_vault_access(ctx, account, allowed_requests)
    }

    pub fn shutdown_vault(ctx: Context<ShutdownVault>) -> Result<()> {
        handle_shutdown_vault(ctx)
    }

    pub fn remove_vault_strategy(ctx: Context<RemoveVaultStrategy>) -> Result<()> {
        handle_remove_vault_strategy(ctx)
    }
}
