use anchor_lang::prelude::*;

use crate::constants::{CONFIG_SEED, DISCRIMINATOR_LEN, ROLES_ADMIN_SEED};
use crate::errors::ErrorCode;
use crate::state::{RolesAdmin, VaultsConfig};

#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(
        init,
        payer = admin,
        space = DISCRIMINATOR_LEN + VaultsConfig::INIT_SPACE,
        seeds = [CONFIG_SEED.as_bytes()],
        bump
    )]
    pub config: Account<'info, VaultsConfig>,

    #[account(
        init,
        payer = admin,
        space = DISCRIMINATOR_LEN + RolesAdmin::INIT_SPACE,
        seeds = [ROLES_ADMIN_SEED.as_bytes()],
        bump
    )]
    pub roles_admin: Account<'info, RolesAdmin>,

    #[account(mut)]
    pub admin: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn handle_initialize(ctx: Context<Initialize>, registry_config: Pubkey) -> Result<()> {
    if registry_config == Pubkey::default() {
        return Err(ErrorCode::ZeroValue.into());
    }

    let config = &mut ctx.accounts.config;
    config.registry_config = registry_config;
    config.next_vault_index = 0;
    config.bump = ctx.bumps.config;

    let roles_admin = &mut ctx.accounts.roles_admin;
    roles_admin.account = ctx.accounts.admin.key();
    roles_admin.bump = ctx.bumps.roles_admin;

    Ok(())
}
