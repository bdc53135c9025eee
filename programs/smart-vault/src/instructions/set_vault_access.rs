use anchor_lang::prelude::*;

use crate::constants::{DISCRIMINATOR_LEN, ROLES_SEED, VAULT_ACCESS_SEED};
use crate::events::VaultAccessUpdatedEvent;
use crate::state::{AccountRoles, SmartVault, VaultAccess};

/// Grants or adjusts an account's allow-list entry on a guarded vault.
#[derive(Accounts)]
#[instruction(account: Pubkey)]
pub struct SetVaultAccess<'info> {
    pub vault: Account<'info, SmartVault>,

    #[account(
        init_if_needed,
        payer = signer,
        space = DISCRIMINATOR_LEN + VaultAccess::INIT_SPACE,
        seeds = [VAULT_ACCESS_SEED.as_bytes(), vault.key().as_ref(), account.as_ref()],
        bump
    )]
    pub vault_access: Account<'info, VaultAccess>,

    #[account(
        seeds = [ROLES_SEED.as_bytes(), signer.key().as_ref()],
        bump = roles.bump,
        constraint = roles.is_guard_manager
    )]
    pub roles: Account<'info, AccountRoles>,

    #[account(mut)]
    pub signer: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn handle_set_vault_access(
    ctx: Context<SetVaultAccess>,
    account: Pubkey,
    allowed_requests: u8,
) -> Result<()> {
    let access = &mut ctx.accounts.vault_access;
    access.vault = ctx.accounts.vault.key();
    access.account = account;
    access.allowed_requests = allowed_requests;
    access.bump = ctx.bumps.vault_access;

    emit!(VaultAccessUpdatedEvent {
        vault_key: ctx.accounts.vault.key(),
        account,
        allowed_requests,
    });

    Ok(())
}
