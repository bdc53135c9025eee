pub const CONFIG_SEED: &str = "config";
pub const ASSET_GROUP_SEED: &str = "asset_group";
pub const PRICE_FEED_SEED: &str = "price_feed";
pub const STRATEGY_SEED: &str = "strategy";
pub const STRATEGY_WALLET_SEED: &str = "strategy_wallet";
pub const DHW_SNAPSHOT_SEED: &str = "dhw_snapshot";
pub const MASTER_WALLET_SEED: &str = "master_wallet";
pub const MASTER_WALLET_AUTHORITY_SEED: &str = "master_wallet_authority";
pub const ROLES_SEED: &str = "roles";
pub const ROLES_ADMIN_SEED: &str = "roles_admin";

/// Widest asset group the ledger supports.
pub const MAX_ASSETS: usize = 4;

/// USD amounts are raw asset units multiplied by a USD_UNIT-scaled price.
pub const USD_UNIT: u64 = 100_000_000;

/// Share price bootstrap for the first deposit into an empty strategy.
pub const INITIAL_SHARE_MULTIPLIER: u64 = 1_000;

pub const MAX_BPS: u64 = 10_000;

pub const DISCRIMINATOR_LEN: usize = 8;
