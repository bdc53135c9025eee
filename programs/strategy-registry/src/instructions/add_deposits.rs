use anchor_lang::prelude::*;

use crate::constants::{CONFIG_SEED, MAX_ASSETS};
use crate::events::DepositsAddedEvent;
use crate::state::{RegistryConfig, Strategy};
use crate::utils::vault_manager::assert_vault_authority;

/// Queues flushed vault deposits for the strategy's current do-hard-work
/// index. Pure bookkeeping: the assets themselves stay in the master wallet
/// until settlement.
#[derive(Accounts)]
pub struct AddDeposits<'info> {
    #[account(seeds = [CONFIG_SEED.as_bytes()], bump = config.bump)]
    pub config: Account<'info, RegistryConfig>,

    #[account(mut)]
    pub strategy: Account<'info, Strategy>,

    /// CHECK: any vault account of the registered vault-manager program
    #[account(owner = config.vault_manager)]
    pub vault: UncheckedAccount<'info>,

    pub vault_authority: Signer<'info>,
}

pub fn handle_add_deposits(ctx: Context<AddDeposits>, amounts: [u64; MAX_ASSETS]) -> Result<u64> {
    assert_vault_authority(
        &ctx.accounts.config,
        &ctx.accounts.vault.key(),
        &ctx.accounts.vault_authority.key(),
    )?;

    let strategy = &mut ctx.accounts.strategy;
    let dhw_index = strategy.add_deposits(&amounts)?;

    emit!(DepositsAddedEvent {
        strategy_key: strategy.key(),
        dhw_index,
        amounts,
    });

    Ok(dhw_index)
}
