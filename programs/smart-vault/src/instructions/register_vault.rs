use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use strategy_registry::state::{AssetGroup, Strategy};

use crate::constants::{
    CONFIG_SEED, DISCRIMINATOR_LEN, MAX_STRATEGIES, ROLES_SEED, SMART_VAULT_SEED, SVT_ESCROW_SEED,
    SVT_MINT_SEED, VAULT_AUTHORITY_SEED,
};
use crate::errors::ErrorCode;
use crate::events::VaultRegisteredEvent;
use crate::state::{AccountRoles, SmartVault, VaultsConfig};

/// Fee schedule and behavior flags of a new vault, fixed at registration.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug)]
pub struct VaultSettings {
    pub management_fee_bps: u64,
    pub deposit_fee_bps: u64,
    pub performance_fee_bps: u64,
    pub fee_receiver: Pubkey,
    pub guarded: bool,
    pub static_allocation: bool,
}

/// Creates a vault over one registered asset group with a fixed strategy
/// set. The strategies come in through the remaining accounts, one per
/// allocation, in allocation order.
#[derive(Accounts)]
pub struct RegisterVault<'info> {
    #[account(mut, seeds = [CONFIG_SEED.as_bytes()], bump = config.bump)]
    pub config: Account<'info, VaultsConfig>,

    pub asset_group: Account<'info, AssetGroup>,

    #[account(
        init,
        payer = admin,
        space = DISCRIMINATOR_LEN + SmartVault::INIT_SPACE,
        seeds = [SMART_VAULT_SEED.as_bytes(), &config.next_vault_index.to_le_bytes()],
        bump
    )]
    pub vault: Account<'info, SmartVault>,

    /// CHECK: PDA signing registry CPIs and token operations for this vault
    #[account(seeds = [VAULT_AUTHORITY_SEED.as_bytes(), vault.key().as_ref()], bump)]
    pub vault_authority: UncheckedAccount<'info>,

    #[account(
        init,
        payer = admin,
        seeds = [SVT_MINT_SEED.as_bytes(), vault.key().as_ref()],
        bump,
        mint::decimals = 6,
        mint::authority = vault_authority
    )]
    pub svt_mint: Account<'info, Mint>,

    /// Holds SVTs minted at sync until deposit receipts claim them.
    #[account(
        init,
        payer = admin,
        seeds = [SVT_ESCROW_SEED.as_bytes(), vault.key().as_ref()],
        bump,
        token::mint = svt_mint,
        token::authority = vault_authority
    )]
    pub svt_escrow: Account<'info, TokenAccount>,

    #[account(
        seeds = [ROLES_SEED.as_bytes(), admin.key().as_ref()],
        bump = roles.bump,
        constraint = roles.is_vaults_admin
    )]
    pub roles: Account<'info, AccountRoles>,

    #[account(mut)]
    pub admin: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

pub fn handle_register_vault<'info>(
    ctx: Context<'_, '_, 'info, 'info, RegisterVault<'info>>,
    allocations: Vec<u64>,
    settings: VaultSettings,
) -> Result<()> {
    let asset_group = &ctx.accounts.asset_group;

    if allocations.is_empty()
        || allocations.len() > MAX_STRATEGIES
        || allocations.len() != ctx.remaining_accounts.len()
    {
        return Err(ErrorCode::InvalidStrategySet.into());
    }

    let mut strategies = Vec::with_capacity(allocations.len());
    for (info, allocation) in ctx.remaining_accounts.iter().zip(allocations.iter()) {
        let strategy = Account::<Strategy>::try_from(info)?;
        if strategy.is_removed {
            return Err(ErrorCode::GhostStrategy.into());
        }
        if strategy.asset_group_id != asset_group.id {
            return Err(ErrorCode::AssetGroupMismatch.into());
        }
        strategies.push((info.key(), *allocation));
    }

    let config = &mut ctx.accounts.config;
    let index = config.next_vault_index;
    let vault_key = ctx.accounts.vault.key();

    ctx.accounts.vault.init(
        vault_key,
        index,
        ctx.bumps.vault,
        ctx.bumps.vault_authority,
        ctx.bumps.svt_mint,
        asset_group.id,
        asset_group.num_assets,
        &strategies,
        settings.management_fee_bps,
        settings.deposit_fee_bps,
        settings.performance_fee_bps,
        settings.fee_receiver,
        settings.guarded,
        settings.static_allocation,
    )?;
    config.next_vault_index += 1;

    emit!(VaultRegisteredEvent {
        vault_key,
        index,
        asset_group_id: asset_group.id,
        num_strategies: strategies.len() as u8,
        management_fee_bps: settings.management_fee_bps,
        deposit_fee_bps: settings.deposit_fee_bps,
        performance_fee_bps: settings.performance_fee_bps,
    });

    Ok(())
}
