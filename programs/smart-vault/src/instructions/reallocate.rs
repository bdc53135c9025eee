use anchor_lang::prelude::*;

use crate::constants::{MAX_STRATEGIES, ROLES_SEED};
use crate::events::VaultReallocatedEvent;
use crate::state::{AccountRoles, SmartVault};

/// Sets new allocation weights for the vault's strategy slots. Takes effect
/// from the next flush; moving already-deployed capital is a separate
/// rebalance step.
#[derive(Accounts)]
pub struct Reallocate<'info> {
    #[account(mut)]
    pub vault: Account<'info, SmartVault>,

    #[account(
        seeds = [ROLES_SEED.as_bytes(), signer.key().as_ref()],
        bump = roles.bump,
        constraint = roles.is_reallocator
    )]
    pub roles: Account<'info, AccountRoles>,

    pub signer: Signer<'info>,
}

pub fn handle_reallocate(ctx: Context<Reallocate>, allocations: Vec<u64>) -> Result<()> {
    let vault = &mut ctx.accounts.vault;
    vault.reallocate(&allocations)?;

    let mut padded = [0u64; MAX_STRATEGIES];
    padded[..allocations.len()].copy_from_slice(&allocations);

    emit!(VaultReallocatedEvent {
        vault_key: vault.key(),
        allocations: padded,
    });

    Ok(())
}
