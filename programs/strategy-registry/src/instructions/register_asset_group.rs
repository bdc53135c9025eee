use anchor_lang::prelude::*;

use crate::constants::{ASSET_GROUP_SEED, DISCRIMINATOR_LEN, ROLES_ADMIN_SEED};
use crate::state::{AssetGroup, RolesAdmin};

#[derive(Accounts)]
#[instruction(id: u64)]
pub struct RegisterAssetGroup<'info> {
    #[account(
        init,
        payer = admin,
        space = DISCRIMINATOR_LEN + AssetGroup::INIT_SPACE,
        seeds = [ASSET_GROUP_SEED.as_bytes(), id.to_le_bytes().as_ref()],
        bump
    )]
    pub asset_group: Account<'info, AssetGroup>,

    #[account(seeds = [ROLES_ADMIN_SEED.as_bytes()], bump = roles_admin.bump)]
    pub roles_admin: Account<'info, RolesAdmin>,

    #[account(mut, address = roles_admin.account)]
    pub admin: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn handle_register_asset_group(
    ctx: Context<RegisterAssetGroup>,
    id: u64,
    assets: Vec<Pubkey>,
) -> Result<()> {
    ctx.accounts
        .asset_group
        .init(id, &assets, ctx.bumps.asset_group)
}
