use anchor_lang::prelude::*;

use crate::constants::ROLES_SEED;
use crate::events::VaultShutdownEvent;
use crate::state::{AccountRoles, SmartVault};

/// Permanently closes the vault for new deposits. Queued and future
/// redemptions keep working so holders can exit.
#[derive(Accounts)]
pub struct ShutdownVault<'info> {
    #[account(mut)]
    pub vault: Account<'info, SmartVault>,

    #[account(
        seeds = [ROLES_SEED.as_bytes(), signer.key().as_ref()],
        bump = roles.bump,
        constraint = roles.is_vaults_admin
    )]
    pub roles: Account<'info, AccountRoles>,

    pub signer: Signer<'info>,
}

pub fn handle_shutdown_vault(ctx: Context<ShutdownVault>) -> Result<()> {
    ctx.accounts.vault.shutdown()?;

    emit!(VaultShutdownEvent {
        vault_key: ctx.accounts.vault.key(),
    });

    Ok(())
}
