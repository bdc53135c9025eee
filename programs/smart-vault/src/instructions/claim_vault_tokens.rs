use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::constants::{FLUSH_BATCH_SEED, SVT_ESCROW_SEED, VAULT_ACCESS_SEED, VAULT_AUTHORITY_SEED};
use crate::errors::ErrorCode;
use crate::events::VaultTokensClaimedEvent;
use crate::state::guard::{run_guards, RequestType};
use crate::state::{DepositReceipt, FlushBatch, SmartVault, VaultAccess};
use crate::utils::registry::vault_authority_seeds;
use crate::utils::token;

/// Converts (part of) a deposit receipt into the SVTs its flush minted.
/// Claims settle against the frozen batch, so the payout is the same no
/// matter when the holder shows up.
#[derive(Accounts)]
pub struct ClaimVaultTokens<'info> {
    pub vault: Account<'info, SmartVault>,

    #[account(
        seeds = [
            FLUSH_BATCH_SEED.as_bytes(),
            vault.key().as_ref(),
            &deposit_receipt.flush_index.to_le_bytes()
        ],
        bump = flush_batch.bump
    )]
    pub flush_batch: Account<'info, FlushBatch>,

    #[account(
        mut,
        constraint = deposit_receipt.vault == vault.key() @ ErrorCode::ReceiptVaultMismatch,
        constraint = deposit_receipt.owner == claimer.key()
    )]
    pub deposit_receipt: Account<'info, DepositReceipt>,

    /// CHECK: PDA authority over the SVT escrow
    #[account(
        seeds = [VAULT_AUTHORITY_SEED.as_bytes(), vault.key().as_ref()],
        bump = vault.vault_authority_bump
    )]
    pub vault_authority: UncheckedAccount<'info>,

    #[account(
        mut,
        seeds = [SVT_ESCROW_SEED.as_bytes(), vault.key().as_ref()],
        bump
    )]
    pub svt_escrow: Account<'info, TokenAccount>,

    #[account(mut, constraint = claimer_svt_wallet.mint == svt_escrow.mint)]
    pub claimer_svt_wallet: Account<'info, TokenAccount>,

    #[account(
        seeds = [VAULT_ACCESS_SEED.as_bytes(), vault.key().as_ref(), claimer.key().as_ref()],
        bump = vault_access.bump
    )]
    pub vault_access: Option<Account<'info, VaultAccess>>,

    pub claimer: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

pub fn handle_claim_vault_tokens(ctx: Context<ClaimVaultTokens>, fraction: u64) -> Result<()> {
    run_guards(
        ctx.accounts.vault.guarded,
        ctx.accounts.vault_access.as_deref(),
        RequestType::ClaimVaultTokens,
    )?;

    let vault = &ctx.accounts.vault;
    let receipt = &mut ctx.accounts.deposit_receipt;

    let num_assets = vault.assets_len();
    let svts = ctx
        .accounts
        .flush_batch
        .claim_svts(&receipt.amounts[..num_assets], fraction)?;
    receipt.burn(fraction)?;

    if svts > 0 {
        let vault_key = vault.key();
        let authority_seeds =
            vault_authority_seeds(vault_key.as_ref(), &vault.vault_authority_bump);
        token::transfer_with_signer(
            ctx.accounts.token_program.to_account_info(),
            ctx.accounts.svt_escrow.to_account_info(),
            ctx.accounts.claimer_svt_wallet.to_account_info(),
            ctx.accounts.vault_authority.to_account_info(),
            svts,
            &authority_seeds,
        )?;
    }

    emit!(VaultTokensClaimedEvent {
        vault_key: vault.key(),
        claimer: ctx.accounts.claimer.key(),
        nft_id: receipt.nft_id,
        claimed_svts: svts,
        burned_balance: fraction,
    });

    Ok(())
}
