use anchor_lang::prelude::*;

use crate::constants::CONFIG_SEED;
use crate::events::WithdrawalsAddedEvent;
use crate::state::{RegistryConfig, Strategy};
use crate::utils::vault_manager::assert_vault_authority;

/// Queues flushed vault redemptions (in strategy shares) for the strategy's
/// current do-hard-work index.
#[derive(Accounts)]
pub struct AddWithdrawals<'info> {
    #[account(seeds = [CONFIG_SEED.as_bytes()], bump = config.bump)]
    pub config: Account<'info, RegistryConfig>,

    #[account(mut)]
    pub strategy: Account<'info, Strategy>,

    /// CHECK: any vault account of the registered vault-manager program
    #[account(owner = config.vault_manager)]
    pub vault: UncheckedAccount<'info>,

    pub vault_authority: Signer<'info>,
}

pub fn handle_add_withdrawals(ctx: Context<AddWithdrawals>, shares: u64) -> Result<u64> {
    assert_vault_authority(
        &ctx.accounts.config,
        &ctx.accounts.vault.key(),
        &ctx.accounts.vault_authority.key(),
    )?;

    let strategy = &mut ctx.accounts.strategy;
    let dhw_index = strategy.add_withdrawals(shares)?;

    emit!(WithdrawalsAddedEvent {
        strategy_key: strategy.key(),
        dhw_index,
        shares,
    });

    Ok(dhw_index)
}
