use anchor_lang::prelude::*;

#[error_code]
pub enum ErrorCode {
    #[msg("Zero value")]
    ZeroValue,

    #[msg("Invalid asset list")]
    InvalidAssetList,

    #[msg("Invalid strategy set")]
    InvalidStrategySet,

    #[msg("Strategy was removed")]
    GhostStrategy,

    #[msg("Strategy asset group does not match the vault")]
    AssetGroupMismatch,

    #[msg("Allocations must sum to the full percent scale")]
    InvalidAllocation,

    #[msg("Fee exceeds its maximum")]
    FeeTooHigh,

    #[msg("Vault was shut down")]
    VaultShutdown,

    #[msg("Deposit ratio deviates beyond the tolerance")]
    DepositRatioViolation,

    #[msg("Insufficient vault shares")]
    InsufficientShares,

    #[msg("Previous flush has not been synced yet")]
    FlushNotSynced,

    #[msg("Nothing to flush")]
    NothingToFlush,

    #[msg("Nothing to sync")]
    NothingToSync,

    #[msg("Do-hard-work has not settled this flush yet")]
    DhwNotRunYet,

    #[msg("Deposits of this flush have not been synced yet")]
    DepositNotSyncedYet,

    #[msg("Withdrawals of this flush have not been synced yet")]
    WithdrawalNotSyncedYet,

    #[msg("Redeemed less than the requested minimum")]
    RedeemSlippageExceeded,

    #[msg("Guard rejected the request")]
    GuardFailed,

    #[msg("Receipt balance too low")]
    InsufficientReceiptBalance,

    #[msg("Receipt does not belong to this vault")]
    ReceiptVaultMismatch,

    #[msg("Vault allocation is static")]
    StaticAllocationVault,

    #[msg("Invalid account pairs")]
    InvalidAccountPairs,
}
