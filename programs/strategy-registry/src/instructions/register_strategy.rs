use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::{
    ASSET_GROUP_SEED, CONFIG_SEED, DISCRIMINATOR_LEN, ROLES_ADMIN_SEED, STRATEGY_SEED,
    STRATEGY_WALLET_SEED,
};
use crate::events::StrategyRegisteredEvent;
use crate::state::{AssetGroup, RegistryConfig, RolesAdmin, Strategy};

#[derive(Accounts)]
pub struct RegisterStrategy<'info> {
    #[account(mut, seeds = [CONFIG_SEED.as_bytes()], bump = config.bump)]
    pub config: Account<'info, RegistryConfig>,

    #[account(
        init,
        payer = admin,
        space = DISCRIMINATOR_LEN + Strategy::INIT_SPACE,
        seeds = [STRATEGY_SEED.as_bytes(), config.next_strategy_index.to_le_bytes().as_ref()],
        bump
    )]
    pub strategy: Account<'info, Strategy>,

    #[account(
        seeds = [ASSET_GROUP_SEED.as_bytes(), asset_group.id.to_le_bytes().as_ref()],
        bump = asset_group.bump
    )]
    pub asset_group: Account<'info, AssetGroup>,

    #[account(seeds = [ROLES_ADMIN_SEED.as_bytes()], bump = roles_admin.bump)]
    pub roles_admin: Account<'info, RolesAdmin>,

    #[account(mut, address = roles_admin.account)]
    pub admin: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn handle_register_strategy(
    ctx: Context<RegisterStrategy>,
    asset_ratio: Vec<u64>,
) -> Result<()> {
    let config = &mut ctx.accounts.config;
    let index = config.next_strategy_index;
    config.next_strategy_index += 1;

    let strategy_key = ctx.accounts.strategy.key();
    let strategy = &mut ctx.accounts.strategy;
    strategy.init(
        strategy_key,
        index,
        ctx.bumps.strategy,
        ctx.accounts.asset_group.id,
        ctx.accounts.asset_group.num_assets,
        &asset_ratio,
    )?;

    emit!(StrategyRegisteredEvent {
        strategy_key: strategy.key(),
        index,
        asset_group_id: strategy.asset_group_id,
        asset_ratio: strategy.asset_ratio,
    });

    Ok(())
}

/// One per (strategy, asset): the token account the strategy's settled
/// position sits in.
#[derive(Accounts)]
pub struct InitStrategyWallet<'info> {
    pub strategy: Account<'info, Strategy>,

    #[account(
        init,
        payer = admin,
        seeds = [
            STRATEGY_WALLET_SEED.as_bytes(),
            strategy.key().as_ref(),
            asset_mint.key().as_ref()
        ],
        bump,
        token::mint = asset_mint,
        token::authority = strategy,
    )]
    pub strategy_wallet: Account<'info, TokenAccount>,

    pub asset_mint: Account<'info, Mint>,

    #[account(seeds = [ROLES_ADMIN_SEED.as_bytes()], bump = roles_admin.bump)]
    pub roles_admin: Account<'info, RolesAdmin>,

    #[account(mut, address = roles_admin.account)]
    pub admin: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

pub fn handle_init_strategy_wallet(_ctx: Context<InitStrategyWallet>) -> Result<()> {
    Ok(())
}
