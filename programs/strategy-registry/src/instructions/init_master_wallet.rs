use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::{MASTER_WALLET_AUTHORITY_SEED, MASTER_WALLET_SEED, ROLES_ADMIN_SEED};
use crate::state::RolesAdmin;

/// Creates the shared holding wallet for one asset. Pending deposits sit
/// here between flush and do-hard-work, settled withdrawals between sync and
/// claim.
#[derive(Accounts)]
pub struct InitMasterWallet<'info> {
    #[account(
        init,
        payer = admin,
        seeds = [MASTER_WALLET_SEED.as_bytes(), asset_mint.key().as_ref()],
        bump,
        token::mint = asset_mint,
        token::authority = master_wallet_authority,
    )]
    pub master_wallet: Account<'info, TokenAccount>,

    /// CHECK: PDA authority over all master-wallet token accounts
    #[account(seeds = [MASTER_WALLET_AUTHORITY_SEED.as_bytes()], bump)]
    pub master_wallet_authority: UncheckedAccount<'info>,

    pub asset_mint: Account<'info, Mint>,

    #[account(seeds = [ROLES_ADMIN_SEED.as_bytes()], bump = roles_admin.bump)]
    pub roles_admin: Account<'info, RolesAdmin>,

    #[account(mut, address = roles_admin.account)]
    pub admin: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

pub fn handle_init_master_wallet(_ctx: Context<InitMasterWallet>) -> Result<()> {
    Ok(())
}
