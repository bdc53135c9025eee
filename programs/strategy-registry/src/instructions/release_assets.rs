use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::constants::{CONFIG_SEED, MASTER_WALLET_AUTHORITY_SEED, MASTER_WALLET_SEED};
use crate::errors::ErrorCode;
use crate::events::AssetsReleasedEvent;
use crate::state::RegistryConfig;
use crate::utils::token;
use crate::utils::vault_manager::assert_vault_authority;

/// Pays settled withdrawal assets out of the master wallet; the vault
/// manager calls this once per asset when a withdrawal receipt is claimed.
#[derive(Accounts)]
pub struct ReleaseAssets<'info> {
    #[account(seeds = [CONFIG_SEED.as_bytes()], bump = config.bump)]
    pub config: Account<'info, RegistryConfig>,

    #[account(
        mut,
        seeds = [MASTER_WALLET_SEED.as_bytes(), master_wallet.mint.as_ref()],
        bump
    )]
    pub master_wallet: Account<'info, TokenAccount>,

    /// CHECK: PDA authority over the master-wallet token accounts
    #[account(seeds = [MASTER_WALLET_AUTHORITY_SEED.as_bytes()], bump)]
    pub master_wallet_authority: UncheckedAccount<'info>,

    #[account(mut, constraint = receiver_token_account.mint == master_wallet.mint)]
    pub receiver_token_account: Account<'info, TokenAccount>,

    /// CHECK: any vault account of the registered vault-manager program
    #[account(owner = config.vault_manager)]
    pub vault: UncheckedAccount<'info>,

    pub vault_authority: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

pub fn handle_release_assets(ctx: Context<ReleaseAssets>, amount: u64) -> Result<()> {
    assert_vault_authority(
        &ctx.accounts.config,
        &ctx.accounts.vault.key(),
        &ctx.accounts.vault_authority.key(),
    )?;

    if amount == 0 {
        return Err(ErrorCode::ZeroValue.into());
    }

    token::transfer_with_signer(
        ctx.accounts.token_program.to_account_info(),
        ctx.accounts.master_wallet.to_account_info(),
        ctx.accounts.receiver_token_account.to_account_info(),
        ctx.accounts.master_wallet_authority.to_account_info(),
        amount,
        &[
            MASTER_WALLET_AUTHORITY_SEED.as_bytes(),
            std::slice::from_ref(&ctx.bumps.master_wallet_authority),
        ],
    )?;

    emit!(AssetsReleasedEvent {
        receiver: ctx.accounts.receiver_token_account.owner,
        asset: ctx.accounts.master_wallet.mint,
        amount,
    });

    Ok(())
}
