use anchor_lang::prelude::*;
use anchor_spl::token::Token;

use crate::constants::{CONFIG_SEED, MAX_ASSETS};
use crate::errors::ErrorCode;
use crate::events::StrategySharesFastRedeemedEvent;
use crate::state::{AssetGroup, RegistryConfig, Strategy};
use crate::utils::asset_accounts::split_redeem_accounts;
use crate::utils::token;
use crate::utils::vault_manager::assert_vault_authority;

/// Immediate redemption against the live position, bypassing the
/// do-hard-work queue. Assets go straight to the receiver accounts supplied
/// in the remaining accounts.
#[derive(Accounts)]
pub struct RedeemFast<'info> {
    #[account(seeds = [CONFIG_SEED.as_bytes()], bump = config.bump)]
    pub config: Account<'info, RegistryConfig>,

    #[account(mut)]
    pub strategy: Account<'info, Strategy>,

    #[account(
        constraint = asset_group.id == strategy.asset_group_id @ ErrorCode::InvalidAssetGroup
    )]
    pub asset_group: Account<'info, AssetGroup>,

    /// CHECK: any vault account of the registered vault-manager program
    #[account(owner = config.vault_manager)]
    pub vault: UncheckedAccount<'info>,

    pub vault_authority: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

pub fn handle_redeem_fast<'info>(
    ctx: Context<'_, '_, 'info, 'info, RedeemFast<'info>>,
    shares: u64,
    withdrawal_slippages: [u64; MAX_ASSETS],
    rate_slippages: [[u64; 2]; MAX_ASSETS],
) -> Result<[u64; MAX_ASSETS]> {
    assert_vault_authority(
        &ctx.accounts.config,
        &ctx.accounts.vault.key(),
        &ctx.accounts.vault_authority.key(),
    )?;

    let num_assets = ctx.accounts.strategy.assets_len();
    let accounts = split_redeem_accounts(
        ctx.remaining_accounts,
        &ctx.accounts.asset_group,
        &ctx.accounts.strategy.key(),
        num_assets,
    )?;

    // Stale or out-of-bound price data aborts before any shares burn.
    let now = Clock::get()?.unix_timestamp;
    for i in 0..num_assets {
        accounts.price_feeds[i].rate_within(
            now,
            ctx.accounts.config.price_max_age,
            rate_slippages[i],
        )?;
    }

    let withdrawn = ctx.accounts.strategy.redeem_fast(shares)?;
    for i in 0..num_assets {
        if withdrawn[i] < withdrawal_slippages[i] {
            return Err(ErrorCode::RedeemSlippageExceeded.into());
        }
    }

    for i in 0..num_assets {
        if withdrawn[i] > 0 {
            token::transfer_with_signer(
                ctx.accounts.token_program.to_account_info(),
                accounts.first_wallets[i].clone(),
                accounts.second_wallets[i].clone(),
                ctx.accounts.strategy.to_account_info(),
                withdrawn[i],
                &ctx.accounts.strategy.seeds(),
            )?;
        }
    }

    emit!(StrategySharesFastRedeemedEvent {
        strategy_key: ctx.accounts.strategy.key(),
        shares,
        assets_withdrawn: withdrawn,
    });

    Ok(withdrawn)
}
