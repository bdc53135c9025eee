pub use strategy_registry::constants::{INITIAL_SHARE_MULTIPLIER, MAX_ASSETS, USD_UNIT};

pub const CONFIG_SEED: &str = "config";
pub const SMART_VAULT_SEED: &str = "smart_vault";
pub const VAULT_AUTHORITY_SEED: &str = "vault_authority";
pub const SVT_MINT_SEED: &str = "svt_mint";
pub const SVT_ESCROW_SEED: &str = "svt_escrow";
pub const FLUSH_BATCH_SEED: &str = "flush_batch";
pub const DEPOSIT_RECEIPT_SEED: &str = "d_nft";
pub const WITHDRAWAL_RECEIPT_SEED: &str = "w_nft";
pub const VAULT_ACCESS_SEED: &str = "vault_access";
pub const ROLES_SEED: &str = "roles";
pub const ROLES_ADMIN_SEED: &str = "roles_admin";

pub const MAX_STRATEGIES: usize = 8;
pub const FLUSH_DISTRIBUTION_LEN: usize = MAX_STRATEGIES * MAX_ASSETS;

pub const FULL_PERCENT: u64 = 10_000;

/// Relative tolerance for caller-supplied multi-asset deposit ratios.
pub const DEPOSIT_TOLERANCE_BPS: u64 = 50;

pub const MANAGEMENT_FEE_MAX_BPS: u64 = 5_00;
pub const DEPOSIT_FEE_MAX_BPS: u64 = 5_00;
pub const PERFORMANCE_FEE_MAX_BPS: u64 = 20_00;

pub const SECONDS_PER_YEAR: i64 = 31_536_000;

/// A whole receipt balance; claims burn fractions of this.
pub const NFT_UNIT: u64 = 1_000_000;

/// Withdrawal receipt ids live in their own range above every deposit id.
pub const WITHDRAWAL_NFT_BASE: u64 = 1 << 63;

pub const DISCRIMINATOR_LEN: usize = 8;
