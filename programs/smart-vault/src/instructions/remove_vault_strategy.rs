use anchor_lang::prelude::*;

use strategy_registry::state::Strategy;

use crate::constants::ROLES_SEED;
use crate::events::VaultStrategyRemovedEvent;
use crate::state::{AccountRoles, SmartVault};

/// Ghost-marks one of the vault's strategies. The slot stops taking flush
/// traffic immediately; its remaining strategy shares stay on the books for
/// a later rebalance out.
#[derive(Accounts)]
pub struct RemoveVaultStrategy<'info> {
    #[account(mut)]
    pub vault: Account<'info, SmartVault>,

    pub strategy: Account<'info, Strategy>,

    #[account(
        seeds = [ROLES_SEED.as_bytes(), signer.key().as_ref()],
        bump = roles.bump,
        constraint = roles.is_vaults_admin
    )]
    pub roles: Account<'info, AccountRoles>,

    pub signer: Signer<'info>,
}

pub fn handle_remove_vault_strategy(ctx: Context<RemoveVaultStrategy>) -> Result<()> {
    let strategy_key = ctx.accounts.strategy.key();
    ctx.accounts.vault.mark_strategy_ghost(&strategy_key)?;

    emit!(VaultStrategyRemovedEvent {
        vault_key: ctx.accounts.vault.key(),
        strategy_key,
    });

    Ok(())
}
