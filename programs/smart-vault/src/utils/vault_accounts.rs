use anchor_lang::prelude::*;

use strategy_registry::constants::{MASTER_WALLET_SEED, PRICE_FEED_SEED};
use strategy_registry::state::{AssetGroup, PriceFeed, Strategy};

use crate::errors::ErrorCode;
use crate::state::SmartVault;

/// Remaining accounts of a user deposit: the vault's live strategies
/// followed by one `[price_feed, user_wallet, master_wallet]` triple per
/// group asset.
pub struct DepositAccounts<'info> {
    pub strategies: Vec<Account<'info, Strategy>>,
    pub price_feeds: Vec<Account<'info, PriceFeed>>,
    pub user_wallets: Vec<AccountInfo<'info>>,
    pub master_wallets: Vec<AccountInfo<'info>>,
}

/// Remaining accounts of a flush: the vault's live strategies followed by
/// one price feed per group asset.
pub struct FlushAccounts<'info> {
    pub strategies: Vec<Account<'info, Strategy>>,
    pub price_feeds: Vec<Account<'info, PriceFeed>>,
}

pub fn split_deposit_accounts<'info>(
    accounts: &'info [AccountInfo<'info>],
    asset_group: &AssetGroup,
    vault: &SmartVault,
) -> Result<DepositAccounts<'info>> {
    let slots = vault.traffic_slots();
    let num_assets = vault.assets_len();
    if accounts.len() != slots.len() + num_assets * 3 {
        return Err(ErrorCode::InvalidAccountPairs.into());
    }

    let (strategy_infos, asset_infos) = accounts.split_at(slots.len());
    let strategies = load_strategies(strategy_infos, &slots, asset_group, vault)?;

    let mut price_feeds = Vec::with_capacity(num_assets);
    let mut user_wallets = Vec::with_capacity(num_assets);
    let mut master_wallets = Vec::with_capacity(num_assets);

    for (i, triple) in asset_infos.chunks(3).enumerate() {
        let asset = &asset_group.assets[i];
        price_feeds.push(load_price_feed(&triple[0], asset)?);
        user_wallets.push(triple[1].clone());

        let (expected, _) = Pubkey::find_program_address(
            &[MASTER_WALLET_SEED.as_bytes(), asset.as_ref()],
            &strategy_registry::ID,
        );
        if triple[2].key() != expected {
            return Err(ErrorCode::InvalidAccountPairs.into());
        }
        master_wallets.push(triple[2].clone());
    }

    Ok(DepositAccounts {
        strategies,
        price_feeds,
        user_wallets,
        master_wallets,
    })
}

pub fn split_flush_accounts<'info>(
    accounts: &'info [AccountInfo<'info>],
    asset_group: &AssetGroup,
    vault: &SmartVault,
) -> Result<FlushAccounts<'info>> {
    let slots = vault.traffic_slots();
    let num_assets = vault.assets_len();
    if accounts.len() != slots.len() + num_assets {
        return Err(ErrorCode::InvalidAccountPairs.into());
    }

    let (strategy_infos, feed_infos) = accounts.split_at(slots.len());
    let strategies = load_strategies(strategy_infos, &slots, asset_group, vault)?;

    let mut price_feeds = Vec::with_capacity(num_assets);
    for (i, info) in feed_infos.iter().enumerate() {
        price_feeds.push(load_price_feed(info, &asset_group.assets[i])?);
    }

    Ok(FlushAccounts {
        strategies,
        price_feeds,
    })
}

fn load_strategies<'info>(
    infos: &'info [AccountInfo<'info>],
    slots: &[usize],
    asset_group: &AssetGroup,
    vault: &SmartVault,
) -> Result<Vec<Account<'info, Strategy>>> {
    let mut strategies = Vec::with_capacity(infos.len());
    for (info, slot) in infos.iter().zip(slots.iter()) {
        if info.key() != vault.strategies[*slot].key {
            return Err(ErrorCode::InvalidAccountPairs.into());
        }

        let strategy = Account::<Strategy>::try_from(info)?;
        if strategy.is_removed {
            return Err(ErrorCode::GhostStrategy.into());
        }
        if strategy.asset_group_id != asset_group.id {
            return Err(ErrorCode::AssetGroupMismatch.into());
        }
        strategies.push(strategy);
    }
    Ok(strategies)
}

fn load_price_feed<'info>(
    info: &'info AccountInfo<'info>,
    asset: &Pubkey,
) -> Result<Account<'info, PriceFeed>> {
    let (expected, _) = Pubkey::find_program_address(
        &[PRICE_FEED_SEED.as_bytes(), asset.as_ref()],
        &strategy_registry::ID,
    );
    if info.key() != expected {
        return Err(ErrorCode::InvalidAccountPairs.into());
    }
    Account::try_from(info)
}
