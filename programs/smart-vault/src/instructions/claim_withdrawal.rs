use anchor_lang::prelude::*;
use anchor_spl::token::Token;

use strategy_registry::program::StrategyRegistry;
use strategy_registry::state::RegistryConfig;

use crate::constants::{CONFIG_SEED, FLUSH_BATCH_SEED, VAULT_ACCESS_SEED, VAULT_AUTHORITY_SEED};
use crate::errors::ErrorCode;
use crate::events::WithdrawalClaimedEvent;
use crate::state::guard::{run_guards, RequestType};
use crate::state::{FlushBatch, SmartVault, VaultAccess, VaultsConfig, WithdrawalReceipt};
use crate::utils::registry::vault_authority_seeds;

/// Pays out (part of) a withdrawal receipt from the registry master
/// wallets. Remaining accounts carry one `[master_wallet, receiver_wallet]`
/// pair per group asset, in group order.
#[derive(Accounts)]
pub struct ClaimWithdrawal<'info> {
    #[account(seeds = [CONFIG_SEED.as_bytes()], bump = config.bump)]
    pub config: Account<'info, VaultsConfig>,

    #[account(address = config.registry_config)]
    pub registry_config: Account<'info, RegistryConfig>,

    pub vault: Account<'info, SmartVault>,

    #[account(
        seeds = [
            FLUSH_BATCH_SEED.as_bytes(),
            vault.key().as_ref(),
            &withdrawal_receipt.flush_index.to_le_bytes()
        ],
        bump = flush_batch.bump
    )]
    pub flush_batch: Account<'info, FlushBatch>,

    #[account(
        mut,
        constraint = withdrawal_receipt.vault == vault.key() @ ErrorCode::ReceiptVaultMismatch,
        constraint = withdrawal_receipt.owner == claimer.key()
    )]
    pub withdrawal_receipt: Account<'info, WithdrawalReceipt>,

    /// CHECK: PDA the registry trusts as this vault's authority
    #[account(
        seeds = [VAULT_AUTHORITY_SEED.as_bytes(), vault.key().as_ref()],
        bump = vault.vault_authority_bump
    )]
    pub vault_authority: UncheckedAccount<'info>,

    /// CHECK: PDA authority over the registry master wallets
    pub master_wallet_authority: UncheckedAccount<'info>,

    #[account(
        seeds = [VAULT_ACCESS_SEED.as_bytes(), vault.key().as_ref(), claimer.key().as_ref()],
        bump = vault_access.bump
    )]
    pub vault_access: Option<Account<'info, VaultAccess>>,

    pub claimer: Signer<'info>,

    pub registry_program: Program<'info, StrategyRegistry>,
    pub token_program: Program<'info, Token>,
}

pub fn handle_claim_withdrawal<'info>(
    ctx: Context<'_, '_, '_, 'info, ClaimWithdrawal<'info>>,
    fraction: u64,
) -> Result<()> {
    run_guards(
        ctx.accounts.vault.guarded,
        ctx.accounts.vault_access.as_deref(),
        RequestType::ClaimWithdrawal,
    )?;

    let vault = &ctx.accounts.vault;
    let receipt = &mut ctx.accounts.withdrawal_receipt;

    let num_assets = vault.assets_len();
    if ctx.remaining_accounts.len() != num_assets * 2 {
        return Err(ErrorCode::InvalidAccountPairs.into());
    }

    let amounts = ctx
        .accounts
        .flush_batch
        .claim_assets(receipt.svt_shares, fraction)?;
    receipt.burn(fraction)?;

    let vault_key = vault.key();
    let authority_seeds = vault_authority_seeds(vault_key.as_ref(), &vault.vault_authority_bump);
    let signer_seeds: &[&[&[u8]]] = &[&authority_seeds];

    for (i, pair) in ctx.remaining_accounts.chunks(2).enumerate() {
        if amounts[i] == 0 {
            continue;
        }

        let cpi_ctx = CpiContext::new_with_signer(
            ctx.accounts.registry_program.to_account_info(),
            strategy_registry::cpi::accounts::ReleaseAssets {
                config: ctx.accounts.registry_config.to_account_info(),
                master_wallet: pair[0].clone(),
                master_wallet_authority: ctx.accounts.master_wallet_authority.to_account_info(),
                receiver_token_account: pair[1].clone(),
                vault: vault.to_account_info(),
                vault_authority: ctx.accounts.vault_authority.to_account_info(),
                token_program: ctx.accounts.token_program.to_account_info(),
            },
            signer_seeds,
        );
        strategy_registry::cpi::release_assets(cpi_ctx, amounts[i])?;
    }

    emit!(WithdrawalClaimedEvent {
        vault_key,
        claimer: ctx.accounts.claimer.key(),
        receiver: ctx.accounts.claimer.key(),
        nft_id: receipt.nft_id,
        amounts,
        burned_balance: fraction,
    });

    Ok(())
}
