use anchor_lang::prelude::*;
use anchor_spl::token::Token;

use strategy_registry::program::StrategyRegistry;
use strategy_registry::state::{AssetGroup, RegistryConfig, Strategy};

use crate::constants::{CONFIG_SEED, MAX_ASSETS, ROLES_SEED, VAULT_AUTHORITY_SEED};
use crate::errors::ErrorCode;
use crate::state::{AccountRoles, SmartVault, VaultsConfig};
use crate::utils::registry::vault_authority_seeds;

/// Moves deployed capital from one strategy to another after a
/// reallocation: fast-redeems shares from the source into the master
/// wallets, then fast-deposits the proceeds into the target. Remaining
/// accounts: per group asset a `[price_feed, strategy_wallet,
/// master_wallet]` triple for the source, then a `[price_feed,
/// master_wallet, strategy_wallet]` triple for the target.
#[derive(Accounts)]
pub struct Rebalance<'info> {
    #[account(seeds = [CONFIG_SEED.as_bytes()], bump = config.bump)]
    pub config: Account<'info, VaultsConfig>,

    #[account(address = config.registry_config)]
    pub registry_config: Account<'info, RegistryConfig>,

    #[account(mut)]
    pub vault: Account<'info, SmartVault>,

    #[account(mut)]
    pub source_strategy: Account<'info, Strategy>,

    #[account(mut)]
    pub target_strategy: Account<'info, Strategy>,

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

    /// CHECK: PDA authority over the registry master wallets
    pub master_wallet_authority: UncheckedAccount<'info>,

    #[account(
        seeds = [ROLES_SEED.as_bytes(), signer.key().as_ref()],
        bump = roles.bump,
        constraint = roles.is_reallocator
    )]
    pub roles: Account<'info, AccountRoles>,

    pub signer: Signer<'info>,

    pub registry_program: Program<'info, StrategyRegistry>,
    pub token_program: Program<'info, Token>,
}

pub fn handle_rebalance<'info>(
    ctx: Context<'_, '_, '_, 'info, Rebalance<'info>>,
    shares: u64,
    rate_slippages: [[u64; 2]; MAX_ASSETS],
) -> Result<()> {
    let vault = &mut ctx.accounts.vault;
    vault.assert_active()?;

    let source_slot = vault.strategy_slot(&ctx.accounts.source_strategy.key())?;
    let target_slot = vault.strategy_slot(&ctx.accounts.target_strategy.key())?;
    if !vault.strategies[target_slot].takes_traffic() {
        return Err(ErrorCode::GhostStrategy.into());
    }
    if shares == 0 || shares > vault.strategies[source_slot].sst_balance {
        return Err(ErrorCode::InsufficientShares.into());
    }

    let num_assets = vault.assets_len();
    if ctx.remaining_accounts.len() != num_assets * 6 {
        return Err(ErrorCode::InvalidAccountPairs.into());
    }
    let (source_accounts, target_accounts) = ctx.remaining_accounts.split_at(num_assets * 3);

    let vault_key = vault.key();
    let vault_authority_bump = vault.vault_authority_bump;
    let authority_seeds = vault_authority_seeds(vault_key.as_ref(), &vault_authority_bump);
    let signer_seeds: &[&[&[u8]]] = &[&authority_seeds];

    let redeem_ctx = CpiContext::new_with_signer(
        ctx.accounts.registry_program.to_account_info(),
        strategy_registry::cpi::accounts::RedeemFast {
            config: ctx.accounts.registry_config.to_account_info(),
            strategy: ctx.accounts.source_strategy.to_account_info(),
            asset_group: ctx.accounts.asset_group.to_account_info(),
            vault: vault.to_account_info(),
            vault_authority: ctx.accounts.vault_authority.to_account_info(),
            token_program: ctx.accounts.token_program.to_account_info(),
        },
        signer_seeds,
    )
    .with_remaining_accounts(source_accounts.to_vec());
    let withdrawn = strategy_registry::cpi::redeem_fast(
        redeem_ctx,
        shares,
        [0u64; MAX_ASSETS],
        rate_slippages,
    )?
    .get();
    vault.strategies[source_slot].sst_balance -= shares;

    let deposit_ctx = CpiContext::new_with_signer(
        ctx.accounts.registry_program.to_account_info(),
        strategy_registry::cpi::accounts::DepositFast {
            config: ctx.accounts.registry_config.to_account_info(),
            strategy: ctx.accounts.target_strategy.to_account_info(),
            asset_group: ctx.accounts.asset_group.to_account_info(),
            master_wallet_authority: ctx.accounts.master_wallet_authority.to_account_info(),
            vault: vault.to_account_info(),
            vault_authority: ctx.accounts.vault_authority.to_account_info(),
            token_program: ctx.accounts.token_program.to_account_info(),
        },
        signer_seeds,
    )
    .with_remaining_accounts(target_accounts.to_vec());
    let minted =
        strategy_registry::cpi::deposit_fast(deposit_ctx, withdrawn, rate_slippages)?.get();
    vault.credit_sst(target_slot, minted);

    Ok(())
}
