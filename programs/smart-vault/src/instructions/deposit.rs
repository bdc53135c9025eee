use anchor_lang::prelude::*;
use anchor_spl::token::Token;

use strategy_registry::state::{AssetGroup, RegistryConfig};

use crate::constants::{
    CONFIG_SEED, DEPOSIT_RECEIPT_SEED, DISCRIMINATOR_LEN, MAX_ASSETS, VAULT_ACCESS_SEED,
};
use crate::errors::ErrorCode;
use crate::events::VaultDepositEvent;
use crate::math::allocation::check_deposit_ratio;
use crate::state::guard::{run_guards, RequestType};
use crate::state::{DepositReceipt, SmartVault, VaultAccess, VaultsConfig};
use crate::utils::token;
use crate::utils::vault_accounts::split_deposit_accounts;

/// Queues a deposit for the vault's next flush. Assets move to the registry
/// master wallets immediately; the depositor gets a receipt that converts to
/// SVTs once the flush is synced.
#[derive(Accounts)]
pub struct Deposit<'info> {
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
        payer = depositor,
        space = DISCRIMINATOR_LEN + DepositReceipt::INIT_SPACE,
        seeds = [
            DEPOSIT_RECEIPT_SEED.as_bytes(),
            vault.key().as_ref(),
            &vault.next_deposit_nft_id.to_le_bytes()
        ],
        bump
    )]
    pub deposit_receipt: Account<'info, DepositReceipt>,

    #[account(
        seeds = [VAULT_ACCESS_SEED.as_bytes(), vault.key().as_ref(), depositor.key().as_ref()],
        bump = vault_access.bump
    )]
    pub vault_access: Option<Account<'info, VaultAccess>>,

    /// CHECK: owner of the new receipt, chosen by the depositor
    pub receiver: UncheckedAccount<'info>,

    #[account(mut)]
    pub depositor: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

pub fn handle_deposit<'info>(
    ctx: Context<'_, '_, 'info, 'info, Deposit<'info>>,
    amounts: Vec<u64>,
    referral: Pubkey,
) -> Result<()> {
    run_guards(
        ctx.accounts.vault.guarded,
        ctx.accounts.vault_access.as_deref(),
        RequestType::Deposit,
    )?;

    let vault = &ctx.accounts.vault;
    let accounts = split_deposit_accounts(
        ctx.remaining_accounts,
        &ctx.accounts.asset_group,
        vault,
    )?;

    let now = Clock::get()?.unix_timestamp;
    let num_assets = vault.assets_len();
    let mut rates = vec![0u64; num_assets];
    for i in 0..num_assets {
        rates[i] = accounts.price_feeds[i]
            .current_rate(now, ctx.accounts.registry_config.price_max_age)?;
    }

    let weights = vault.traffic_weights();
    let ratios: Vec<_> = accounts.strategies.iter().map(|s| s.asset_ratio).collect();
    check_deposit_ratio(&amounts, &weights, &ratios, &rates)?;

    ctx.accounts.vault.add_pending_deposit(&amounts)?;

    for i in 0..num_assets {
        if amounts[i] > 0 {
            token::transfer(
                ctx.accounts.token_program.to_account_info(),
                accounts.user_wallets[i].clone(),
                accounts.master_wallets[i].clone(),
                ctx.accounts.depositor.to_account_info(),
                amounts[i],
            )?;
        }
    }

    let vault = &mut ctx.accounts.vault;
    let nft_id = vault.take_deposit_nft_id();
    ctx.accounts.deposit_receipt.init(
        vault.key(),
        ctx.accounts.receiver.key(),
        nft_id,
        vault.current_flush_index,
        ctx.bumps.deposit_receipt,
        &amounts,
        referral,
        now,
    );

    let mut deposited = [0u64; MAX_ASSETS];
    deposited[..amounts.len()].copy_from_slice(&amounts);

    emit!(VaultDepositEvent {
        vault_key: vault.key(),
        depositor: ctx.accounts.depositor.key(),
        receiver: ctx.accounts.receiver.key(),
        referral,
        nft_id,
        flush_index: vault.current_flush_index,
        amounts: deposited,
        timestamp: now,
    });

    Ok(())
}
