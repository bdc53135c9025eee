use anchor_lang::prelude::*;
use anchor_spl::token::Token;

use crate::constants::{CONFIG_SEED, MASTER_WALLET_AUTHORITY_SEED, MAX_ASSETS};
use crate::errors::ErrorCode;
use crate::events::StrategySharesFastDepositedEvent;
use crate::state::{AssetGroup, RegistryConfig, Strategy};
use crate::utils::asset_accounts::split_settlement_accounts;
use crate::utils::token;
use crate::utils::vault_manager::assert_vault_authority;

/// Immediate-settlement deposit out of the master wallet, used by
/// reallocation to move capital into underweight strategies without waiting
/// for a do-hard-work round.
#[derive(Accounts)]
pub struct DepositFast<'info> {
    #[account(seeds = [CONFIG_SEED.as_bytes()], bump = config.bump)]
    pub config: Account<'info, RegistryConfig>,

    #[account(mut)]
    pub strategy: Account<'info, Strategy>,

    #[account(
        constraint = asset_group.id == strategy.asset_group_id @ ErrorCode::InvalidAssetGroup
    )]
    pub asset_group: Account<'info, AssetGroup>,

    /// CHECK: PDA authority over the master-wallet token accounts
    #[account(seeds = [MASTER_WALLET_AUTHORITY_SEED.as_bytes()], bump)]
    pub master_wallet_authority: UncheckedAccount<'info>,

    /// CHECK: any vault account of the registered vault-manager program
    #[account(owner = config.vault_manager)]
    pub vault: UncheckedAccount<'info>,

    pub vault_authority: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

pub fn handle_deposit_fast<'info>(
    ctx: Context<'_, '_, 'info, 'info, DepositFast<'info>>,
    amounts: [u64; MAX_ASSETS],
    rate_slippages: [[u64; 2]; MAX_ASSETS],
) -> Result<u64> {
    assert_vault_authority(
        &ctx.accounts.config,
        &ctx.accounts.vault.key(),
        &ctx.accounts.vault_authority.key(),
    )?;

    let num_assets = ctx.accounts.strategy.assets_len();
    let accounts = split_settlement_accounts(
        ctx.remaining_accounts,
        &ctx.accounts.asset_group,
        &ctx.accounts.strategy.key(),
        num_assets,
    )?;

    let now = Clock::get()?.unix_timestamp;
    let mut rates = vec![0u64; num_assets];
    for i in 0..num_assets {
        rates[i] = accounts.price_feeds[i].rate_within(
            now,
            ctx.accounts.config.price_max_age,
            rate_slippages[i],
        )?;
    }

    let shares = ctx.accounts.strategy.deposit_fast(&amounts, &rates)?;

    let master_authority_seeds: &[&[u8]] = &[
        MASTER_WALLET_AUTHORITY_SEED.as_bytes(),
        std::slice::from_ref(&ctx.bumps.master_wallet_authority),
    ];
    for i in 0..num_assets {
        if amounts[i] > 0 {
            token::transfer_with_signer(
                ctx.accounts.token_program.to_account_info(),
                accounts.first_wallets[i].clone(),
                accounts.second_wallets[i].clone(),
                ctx.accounts.master_wallet_authority.to_account_info(),
                amounts[i],
                master_authority_seeds,
            )?;
        }
    }

    emit!(StrategySharesFastDepositedEvent {
        strategy_key: ctx.accounts.strategy.key(),
        shares,
        assets_deposited: amounts,
    });

    Ok(shares)
}
