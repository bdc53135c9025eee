use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::constants::{
    DISCRIMINATOR_LEN, SVT_ESCROW_SEED, VAULT_ACCESS_SEED, WITHDRAWAL_RECEIPT_SEED,
};
use crate::events::VaultRedeemEvent;
use crate::state::guard::{run_guards, RequestType};
use crate::state::{SmartVault, VaultAccess, WithdrawalReceipt};
use crate::utils::token;

/// Queues a redemption for the vault's next flush. The SVTs move into the
/// vault escrow now and burn at flush; the receipt converts to assets once
/// the flush is synced.
#[derive(Accounts)]
pub struct Redeem<'info> {
    #[account(mut)]
    pub vault: Account<'info, SmartVault>,

    #[account(
        init,
        payer = redeemer,
        space = DISCRIMINATOR_LEN + WithdrawalReceipt::INIT_SPACE,
        seeds = [
            WITHDRAWAL_RECEIPT_SEED.as_bytes(),
            vault.key().as_ref(),
            &vault.next_withdrawal_nft_id.to_le_bytes()
        ],
        bump
    )]
    pub withdrawal_receipt: Account<'info, WithdrawalReceipt>,

    #[account(
        mut,
        seeds = [SVT_ESCROW_SEED.as_bytes(), vault.key().as_ref()],
        bump
    )]
    pub svt_escrow: Account<'info, TokenAccount>,

    #[account(mut, constraint = redeemer_svt_wallet.mint == svt_escrow.mint)]
    pub redeemer_svt_wallet: Account<'info, TokenAccount>,

    #[account(
        seeds = [VAULT_ACCESS_SEED.as_bytes(), vault.key().as_ref(), redeemer.key().as_ref()],
        bump = vault_access.bump
    )]
    pub vault_access: Option<Account<'info, VaultAccess>>,

    #[account(mut)]
    pub redeemer: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

pub fn handle_redeem(ctx: Context<Redeem>, svt_shares: u64) -> Result<()> {
    run_guards(
        ctx.accounts.vault.guarded,
        ctx.accounts.vault_access.as_deref(),
        RequestType::Redeem,
    )?;

    let vault = &mut ctx.accounts.vault;
    vault.add_pending_redeem(svt_shares)?;

    token::transfer(
        ctx.accounts.token_program.to_account_info(),
        ctx.accounts.redeemer_svt_wallet.to_account_info(),
        ctx.accounts.svt_escrow.to_account_info(),
        ctx.accounts.redeemer.to_account_info(),
        svt_shares,
    )?;

    let now = Clock::get()?.unix_timestamp;
    let nft_id = vault.take_withdrawal_nft_id();
    ctx.accounts.withdrawal_receipt.init(
        vault.key(),
        ctx.accounts.redeemer.key(),
        nft_id,
        vault.current_flush_index,
        ctx.bumps.withdrawal_receipt,
        svt_shares,
        now,
    );

    emit!(VaultRedeemEvent {
        vault_key: vault.key(),
        redeemer: ctx.accounts.redeemer.key(),
        nft_id,
        flush_index: vault.current_flush_index,
        svt_shares,
    });

    Ok(())
}
