use anchor_lang::prelude::*;

use crate::constants::{CONFIG_SEED, DISCRIMINATOR_LEN, ROLES_ADMIN_SEED};
use crate::errors::ErrorCode;
use crate::state::{RegistryConfig, RolesAdmin};

#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(
        init,
        payer = admin,
        space = DISCRIMINATOR_LEN + RegistryConfig::INIT_SPACE,
        seeds = [CONFIG_SEED.as_bytes()],
        bump
    )]
    pub config: Account<'info, RegistryConfig>,

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

pub fn handle_initialize(
    ctx: Context<Initialize>,
    vault_manager: Pubkey,
    price_max_age: i64,
) -> Result<()> {
    if vault_manager == Pubkey::default() || price_max_age <= 0 {
        return Err(ErrorCode::ZeroValue.into());
    }

    let config = &mut ctx.accounts.config;
    config.vault_manager = vault_manager;
    config.next_strategy_index = 0;
    config.price_max_age = price_max_age;
    config.bump = ctx.bumps.config;

    let roles_admin = &mut ctx.accounts.roles_admin;
    roles_admin.account = ctx.accounts.admin.key();
    roles_admin.bump = ctx.bumps.roles_admin;

    Ok(())
}
