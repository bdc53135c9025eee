use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use strategy_registry::program::StrategyRegistry;
use strategy_registry::state::{AssetGroup, RegistryConfig};

use crate::constants::{
    CONFIG_SEED, DISCRIMINATOR_LEN, FLUSH_BATCH_SEED, SVT_ESCROW_SEED, SVT_MINT_SEED,
    VAULT_AUTHORITY_SEED,
};
use crate::errors::ErrorCode;
use crate::events::VaultFlushedEvent;
use crate::math::allocation::distribute_deposit;
use crate::state::{FlushBatch, SmartVault, VaultsConfig};
use crate::utils::registry::vault_authority_seeds;
use crate::utils::token;
use crate::utils::vault_accounts::split_flush_accounts;

/// Freezes everything queued since the previous flush into a batch and
/// routes it to the strategies: deposits are split by allocation and queued
/// per strategy, escrowed SVTs burn and become queued strategy-share
/// withdrawals. Permissionless; the previous flush must be synced first.
#[derive(Accounts)]
pub struct FlushVault<'info> {
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

    #[account(
        init,
        payer = flusher,
        space = DISCRIMINATOR_LEN + FlushBatch::INIT_SPACE,
        seeds = [
            FLUSH_BATCH_SEED.as_bytes(),
            vault.key().as_ref(),
            &vault.current_flush_index.to_le_bytes()
        ],
        bump
    )]
    pub flush_batch: Account<'info, FlushBatch>,

    /// CHECK: PDA signing registry CPIs for this vault
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

    #[account(
        mut,
        seeds = [SVT_ESCROW_SEED.as_bytes(), vault.key().as_ref()],
        bump
    )]
    pub svt_escrow: Account<'info, TokenAccount>,

    #[account(mut)]
    pub flusher: Signer<'info>,

    pub registry_program: Program<'info, StrategyRegistry>,
    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

pub fn handle_flush_vault<'info>(
    ctx: Context<'_, '_, 'info, 'info, FlushVault<'info>>,
) -> Result<()> {
    let accounts = split_flush_accounts(
        ctx.remaining_accounts,
        &ctx.accounts.asset_group,
        &ctx.accounts.vault,
    )?;
    let slots = ctx.accounts.vault.traffic_slots();
    let num_assets = ctx.accounts.vault.assets_len();

    let data = ctx.accounts.vault.begin_flush()?;
    let has_deposits = data.deposited.iter().any(|a| *a > 0);

    let mut rates = vec![0u64; num_assets];
    let distribution = if has_deposits {
        let now = Clock::get()?.unix_timestamp;
        for i in 0..num_assets {
            rates[i] = accounts.price_feeds[i]
                .current_rate(now, ctx.accounts.registry_config.price_max_age)?;
        }

        let weights = ctx.accounts.vault.traffic_weights();
        let ratios: Vec<_> = accounts.strategies.iter().map(|s| s.asset_ratio).collect();
        distribute_deposit(&data.deposited[..num_assets], &weights, &ratios, &rates)?
    } else {
        Vec::new()
    };

    let vault_key = ctx.accounts.vault.key();
    let vault_authority_bump = ctx.accounts.vault.vault_authority_bump;
    let authority_seeds = vault_authority_seeds(vault_key.as_ref(), &vault_authority_bump);
    let signer_seeds: &[&[&[u8]]] = &[&authority_seeds];

    if data.redeemed_svts > 0 {
        token::burn_with_signer(
            ctx.accounts.token_program.to_account_info(),
            ctx.accounts.svt_mint.to_account_info(),
            ctx.accounts.svt_escrow.to_account_info(),
            ctx.accounts.vault_authority.to_account_info(),
            data.redeemed_svts,
            &authority_seeds,
        )?;
    }

    let batch = &mut ctx.accounts.flush_batch;
    batch.record_flush(vault_key, ctx.bumps.flush_batch, &data);
    if has_deposits {
        // Claims of this batch price at the rates the flush routed with,
        // whatever rates its strategies later settle at.
        batch.set_exchange_rates(&rates);
    }

    for (i, slot) in slots.iter().enumerate() {
        let strategy_info = accounts.strategies[i].to_account_info();

        if has_deposits {
            let cpi_ctx = CpiContext::new_with_signer(
                ctx.accounts.registry_program.to_account_info(),
                strategy_registry::cpi::accounts::AddDeposits {
                    config: ctx.accounts.registry_config.to_account_info(),
                    strategy: strategy_info.clone(),
                    vault: ctx.accounts.vault.to_account_info(),
                    vault_authority: ctx.accounts.vault_authority.to_account_info(),
                },
                signer_seeds,
            );
            let dhw_index =
                strategy_registry::cpi::add_deposits(cpi_ctx, distribution[i])?.get();
            batch.set_dhw_index(*slot, dhw_index);
            batch.set_distribution(*slot, &distribution[i]);
        }

        if data.strategy_shares[*slot] > 0 {
            let cpi_ctx = CpiContext::new_with_signer(
                ctx.accounts.registry_program.to_account_info(),
                strategy_registry::cpi::accounts::AddWithdrawals {
                    config: ctx.accounts.registry_config.to_account_info(),
                    strategy: strategy_info,
                    vault: ctx.accounts.vault.to_account_info(),
                    vault_authority: ctx.accounts.vault_authority.to_account_info(),
                },
                signer_seeds,
            );
            let dhw_index =
                strategy_registry::cpi::add_withdrawals(cpi_ctx, data.strategy_shares[*slot])?
                    .get();
            batch.set_dhw_index(*slot, dhw_index);
        }
    }

    emit!(VaultFlushedEvent {
        vault_key,
        flush_index: data.flush_index,
        deposited: data.deposited,
        redeemed_svt_shares: data.redeemed_svts,
        dhw_indexes: batch.dhw_indexes,
    });

    Ok(())
}
