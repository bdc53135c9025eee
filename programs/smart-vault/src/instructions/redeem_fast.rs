use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use strategy_registry::program::StrategyRegistry;
use strategy_registry::state::{AssetGroup, RegistryConfig};

use crate::constants::{
    CONFIG_SEED, MAX_ASSETS, SVT_MINT_SEED, VAULT_ACCESS_SEED, VAULT_AUTHORITY_SEED,
};
use crate::errors::ErrorCode;
use crate::events::VaultRedeemFastEvent;
use crate::state::guard::{run_guards, RequestType};
use crate::state::{SmartVault, VaultAccess, VaultsConfig};
use crate::utils::registry::vault_authority_seeds;
use crate::utils::token;

/// Immediate redemption, bypassing the flush queue. Burns the SVTs and
/// redeems the matching cut of every live strategy's shares straight to the
/// redeemer's wallets, all priced at the pre-burn supply. Remaining
/// accounts: per traffic strategy in slot order, the strategy account
/// followed by one `[price_feed, strategy_wallet, receiver_wallet]` triple
/// per group asset.
#[derive(Accounts)]
pub struct RedeemFast<'info> {
    #[account(seeds = [CONFIG_SEED.as_bytes()], bump = config.bump)]
    pub config: Account<'info, VaultsConfig>,

    #[account(address = config.registry_config)]
    pub registry_config: Account<'info, RegistryConfig>,

    #[account(mut)]
    pub vault: Account<'info, SmartVault>,

    #[account(
        constraint = asset_group.id == vault.asset_group_id @ ErrorCode::AssetGroupMismatch
    )]
    pub asset_group: Account<'info, AssetGroup>,

    /// CHECK: PDA the registry trusts as this vault's authority
    #[account(
        seeds = [VAULT_AUTHORITY_SEED.as_bytes(), vault.key().as_ref()],
        bump = vault.vault_authority_bump
    )]
    pub vault_authority: UncheckedAccount<'info>,

    #[account(
        mut,
        seeds = [SVT_MINT_SEED.as_bytes(), vault.key().as_ref()],
        bump = vault.svt_mint_bump
    )]
    pub svt_mint: Account<'info, Mint>,

    #[account(mut, constraint = redeemer_svt_wallet.mint == svt_mint.key())]
    pub redeemer_svt_wallet: Account<'info, TokenAccount>,

    #[account(
        seeds = [VAULT_ACCESS_SEED.as_bytes(), vault.key().as_ref(), redeemer.key().as_ref()],
        bump = vault_access.bump
    )]
    pub vault_access: Option<Account<'info, VaultAccess>>,

    pub redeemer: Signer<'info>,

    pub registry_program: Program<'info, StrategyRegistry>,
    pub token_program: Program<'info, Token>,
}

pub fn handle_redeem_fast<'info>(
    ctx: Context<'_, '_, '_, 'info, RedeemFast<'info>>,
    svt_shares: u64,
    withdrawal_slippages: [u64; MAX_ASSETS],
    rate_slippages: [[u64; 2]; MAX_ASSETS],
) -> Result<()> {
    run_guards(
        ctx.accounts.vault.guarded,
        ctx.accounts.vault_access.as_deref(),
        RequestType::Redeem,
    )?;

    let vault = &mut ctx.accounts.vault;
    let num_assets = vault.assets_len();
    let slots = vault.traffic_slots();
    let leg_len = 1 + num_assets * 3;
    if ctx.remaining_accounts.len() != slots.len() * leg_len {
        return Err(ErrorCode::InvalidAccountPairs.into());
    }

    let redemptions = vault.begin_fast_redeem(svt_shares)?;

    token::burn(
        ctx.accounts.token_program.to_account_info(),
        ctx.accounts.svt_mint.to_account_info(),
        ctx.accounts.redeemer_svt_wallet.to_account_info(),
        ctx.accounts.redeemer.to_account_info(),
        svt_shares,
    )?;

    let vault_key = vault.key();
    let vault_authority_bump = vault.vault_authority_bump;
    let authority_seeds = vault_authority_seeds(vault_key.as_ref(), &vault_authority_bump);
    let signer_seeds: &[&[&[u8]]] = &[&authority_seeds];

    let mut withdrawn = [0u64; MAX_ASSETS];
    for (leg, slot) in slots.iter().enumerate() {
        let Some((_, shares)) = redemptions.iter().find(|(s, _)| s == slot) else {
            continue;
        };

        let leg_accounts = &ctx.remaining_accounts[leg * leg_len..(leg + 1) * leg_len];
        let strategy_info = &leg_accounts[0];
        if strategy_info.key() != vault.strategies[*slot].key {
            return Err(ErrorCode::InvalidAccountPairs.into());
        }

        let cpi_ctx = CpiContext::new_with_signer(
            ctx.accounts.registry_program.to_account_info(),
            strategy_registry::cpi::accounts::RedeemFast {
                config: ctx.accounts.registry_config.to_account_info(),
                strategy: strategy_info.clone(),
                asset_group: ctx.accounts.asset_group.to_account_info(),
                vault: vault.to_account_info(),
                vault_authority: ctx.accounts.vault_authority.to_account_info(),
                token_program: ctx.accounts.token_program.to_account_info(),
            },
            signer_seeds,
        )
        .with_remaining_accounts(leg_accounts[1..].to_vec());

        // Per-leg minimums stay at zero; the caller's bounds apply to the
        // totals below.
        let amounts = strategy_registry::cpi::redeem_fast(
            cpi_ctx,
            *shares,
            [0u64; MAX_ASSETS],
            rate_slippages,
        )?
        .get();
        for (total, amount) in withdrawn.iter_mut().zip(amounts.iter()) {
            *total += amount;
        }
    }

    for i in 0..num_assets {
        if withdrawn[i] < withdrawal_slippages[i] {
            return Err(ErrorCode::RedeemSlippageExceeded.into());
        }
    }

    emit!(VaultRedeemFastEvent {
        vault_key,
        redeemer: ctx.accounts.redeemer.key(),
        svt_shares,
        assets_withdrawn: withdrawn,
    });

    Ok(())
}
