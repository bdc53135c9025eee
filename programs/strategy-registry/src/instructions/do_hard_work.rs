use anchor_lang::prelude::*;
use anchor_spl::token::Token;

use crate::constants::{
    CONFIG_SEED, DHW_SNAPSHOT_SEED, DISCRIMINATOR_LEN, MASTER_WALLET_AUTHORITY_SEED, MAX_ASSETS,
    ROLES_SEED,
};
use crate::errors::ErrorCode;
use crate::events::DoHardWorkEvent;
use crate::state::{AccountRoles, AssetGroup, DhwSnapshot, RegistryConfig, Strategy};
use crate::utils::asset_accounts::split_settlement_accounts;
use crate::utils::token;

/// Settles one strategy's pending deposits and withdrawals against its
/// position. A multi-strategy batch is composed as several of these
/// instructions in one transaction, which keeps the no-partial-settlement
/// guarantee: any slippage or staleness failure aborts the whole batch.
#[derive(Accounts)]
#[instruction(dhw_index: u64)]
pub struct DoHardWork<'info> {
    #[account(seeds = [CONFIG_SEED.as_bytes()], bump = config.bump)]
    pub config: Account<'info, RegistryConfig>,

    #[account(mut, constraint = strategy.current_dhw_index == dhw_index @ ErrorCode::DhwNotRunYet)]
    pub strategy: Account<'info, Strategy>,

    #[account(
        constraint = asset_group.id == strategy.asset_group_id @ ErrorCode::InvalidAssetGroup
    )]
    pub asset_group: Account<'info, AssetGroup>,

    #[account(
        init,
        payer = worker,
        space = DISCRIMINATOR_LEN + DhwSnapshot::INIT_SPACE,
        seeds = [
            DHW_SNAPSHOT_SEED.as_bytes(),
            strategy.key().as_ref(),
            dhw_index.to_le_bytes().as_ref()
        ],
        bump
    )]
    pub snapshot: Account<'info, DhwSnapshot>,

    /// CHECK: PDA authority over the master-wallet token accounts
    #[account(seeds = [MASTER_WALLET_AUTHORITY_SEED.as_bytes()], bump)]
    pub master_wallet_authority: UncheckedAccount<'info>,

    #[account(
        seeds = [ROLES_SEED.as_bytes(), worker.key().as_ref()],
        bump = roles.bump,
        constraint = roles.is_do_hard_worker
    )]
    pub roles: Account<'info, AccountRoles>,

    #[account(mut)]
    pub worker: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

pub fn handle_do_hard_work<'info>(
    ctx: Context<'_, '_, 'info, 'info, DoHardWork<'info>>,
    dhw_index: u64,
    rate_slippages: [[u64; 2]; MAX_ASSETS],
    base_yield_bps: i64,
) -> Result<()> {
    let num_assets = ctx.accounts.strategy.assets_len();
    let accounts = split_settlement_accounts(
        ctx.remaining_accounts,
        &ctx.accounts.asset_group,
        &ctx.accounts.strategy.key(),
        num_assets,
    )?;
    let (price_feeds, master_wallets, strategy_wallets) = (
        accounts.price_feeds,
        accounts.first_wallets,
        accounts.second_wallets,
    );

    let now = Clock::get()?.unix_timestamp;
    let mut rates = vec![0u64; num_assets];
    for i in 0..num_assets {
        rates[i] = price_feeds[i].rate_within(now, ctx.accounts.config.price_max_age, rate_slippages[i])?;
    }

    let strategy = &mut ctx.accounts.strategy;
    let settlement = strategy.settle(&rates, base_yield_bps)?;

    ctx.accounts.snapshot.record(
        strategy.key(),
        dhw_index,
        ctx.bumps.snapshot,
        &rates,
        &settlement,
        now,
    );

    // Pending deposits leave the shared holding wallet for the strategy;
    // settled withdrawals travel the other way.
    let master_authority_seeds: &[&[u8]] = &[
        MASTER_WALLET_AUTHORITY_SEED.as_bytes(),
        std::slice::from_ref(&ctx.bumps.master_wallet_authority),
    ];
    for i in 0..num_assets {
        if settlement.assets_deposited[i] > 0 {
            token::transfer_with_signer(
                ctx.accounts.token_program.to_account_info(),
                master_wallets[i].clone(),
                strategy_wallets[i].clone(),
                ctx.accounts.master_wallet_authority.to_account_info(),
                settlement.assets_deposited[i],
                master_authority_seeds,
            )?;
        }
        if settlement.assets_withdrawn[i] > 0 {
            token::transfer_with_signer(
                ctx.accounts.token_program.to_account_info(),
                strategy_wallets[i].clone(),
                master_wallets[i].clone(),
                ctx.accounts.strategy.to_account_info(),
                settlement.assets_withdrawn[i],
                &ctx.accounts.strategy.seeds(),
            )?;
        }
    }

    let strategy = &ctx.accounts.strategy;
    emit!(DoHardWorkEvent {
        strategy_key: strategy.key(),
        dhw_index,
        assets_deposited: settlement.assets_deposited,
        shares_minted: settlement.shares_minted,
        shares_redeemed: settlement.shares_redeemed,
        assets_withdrawn: settlement.assets_withdrawn,
        total_value_usd: strategy.total_value_usd(&rates),
        total_shares: strategy.total_shares,
        yield_bps: base_yield_bps,
        timestamp: now,
    });

    Ok(())
}
