use anchor_lang::prelude::*;

use crate::constants::{MASTER_WALLET_SEED, PRICE_FEED_SEED, STRATEGY_WALLET_SEED};
use crate::errors::ErrorCode;
use crate::state::{AssetGroup, PriceFeed};

/// Per-asset account bundle passed through remaining accounts, one triple
/// per group asset in group order.
pub struct AssetTriples<'info> {
    pub price_feeds: Vec<Account<'info, PriceFeed>>,
    pub first_wallets: Vec<AccountInfo<'info>>,
    pub second_wallets: Vec<AccountInfo<'info>>,
}

/// [price feed, master wallet, strategy wallet] per asset; all three
/// addresses are rederived and checked.
pub fn split_settlement_accounts<'info>(
    remaining: &'info [AccountInfo<'info>],
    asset_group: &AssetGroup,
    strategy_key: &Pubkey,
    num_assets: usize,
) -> Result<AssetTriples<'info>> {
    split(remaining, asset_group, num_assets, |asset| {
        let (expected_master, _) = Pubkey::find_program_address(
            &[MASTER_WALLET_SEED.as_bytes(), asset.as_ref()],
            &crate::id(),
        );
        let (expected_wallet, _) = Pubkey::find_program_address(
            &[
                STRATEGY_WALLET_SEED.as_bytes(),
                strategy_key.as_ref(),
                asset.as_ref(),
            ],
            &crate::id(),
        );
        (expected_master, Some(expected_wallet))
    })
}

/// [price feed, strategy wallet, receiver token account] per asset; the
/// receiver account is the caller's to get right.
pub fn split_redeem_accounts<'info>(
    remaining: &'info [AccountInfo<'info>],
    asset_group: &AssetGroup,
    strategy_key: &Pubkey,
    num_assets: usize,
) -> Result<AssetTriples<'info>> {
    split(remaining, asset_group, num_assets, |asset| {
        let (expected_wallet, _) = Pubkey::find_program_address(
            &[
                STRATEGY_WALLET_SEED.as_bytes(),
                strategy_key.as_ref(),
                asset.as_ref(),
            ],
            &crate::id(),
        );
        (expected_wallet, None)
    })
}

fn split<'info>(
    remaining: &'info [AccountInfo<'info>],
    asset_group: &AssetGroup,
    num_assets: usize,
    expected: impl Fn(&Pubkey) -> (Pubkey, Option<Pubkey>),
) -> Result<AssetTriples<'info>> {
    if remaining.len() != 3 * num_assets {
        return Err(ErrorCode::InvalidAccountPairs.into());
    }

    let mut price_feeds = Vec::with_capacity(num_assets);
    let mut first_wallets = Vec::with_capacity(num_assets);
    let mut second_wallets = Vec::with_capacity(num_assets);

    for (i, asset) in asset_group.assets().iter().enumerate() {
        let feed_info = &remaining[3 * i];
        let first_info = &remaining[3 * i + 1];
        let second_info = &remaining[3 * i + 2];

        let (expected_feed, _) = Pubkey::find_program_address(
            &[PRICE_FEED_SEED.as_bytes(), asset.as_ref()],
            &crate::id(),
        );
        let (expected_first, expected_second) = expected(asset);

        if *feed_info.key != expected_feed || *first_info.key != expected_first {
            return Err(ErrorCode::InvalidAccountPairs.into());
        }
        if let Some(expected_second) = expected_second {
            if *second_info.key != expected_second {
                return Err(ErrorCode::InvalidAccountPairs.into());
            }
        }

        price_feeds.push(Account::try_from(feed_info)?);
        first_wallets.push(first_info.clone());
        second_wallets.push(second_info.clone());
    }

    Ok(AssetTriples {
        price_feeds,
        first_wallets,
        second_wallets,
    })
}
