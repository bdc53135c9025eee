use anchor_lang::prelude::*;

use crate::constants::{DISCRIMINATOR_LEN, ROLES_ADMIN_SEED, ROLES_SEED};
use crate::state::{AccountRoles, Role, RolesAdmin};

#[derive(Accounts)]
#[instruction(user: Pubkey)]
pub struct SetRole<'info> {
    #[account(seeds = [ROLES_ADMIN_SEED.as_bytes()], bump = roles_admin.bump)]
    pub roles_admin: Account<'info, RolesAdmin>,

    #[account(
        init_if_needed,
        payer = admin,
        space = DISCRIMINATOR_LEN + AccountRoles::INIT_SPACE,
        seeds = [ROLES_SEED.as_bytes(), user.as_ref()],
        bump
    )]
    pub roles: Account<'info, AccountRoles>,

    #[account(mut, address = roles_admin.account)]
    pub admin: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn handle_set_role(ctx: Context<SetRole>, user: Pubkey, role: Role) -> Result<()> {
    let roles = &mut ctx.accounts.roles;
    roles.account = user;
    roles.bump = ctx.bumps.roles;
    roles.set_role(role);
    Ok(())
}

pub fn handle_drop_role(ctx: Context<SetRole>, _user: Pubkey, role: Role) -> Result<()> {
    ctx.accounts.roles.drop_role(role);
    Ok(())
}
