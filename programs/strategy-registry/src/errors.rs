use anchor_lang::prelude::*;

#[error_code]
pub enum ErrorCode {
    #[msg("Zero value")]
    ZeroValue,

    #[msg("Invalid asset group")]
    InvalidAssetGroup,

    #[msg("Asset is not part of the strategy's asset group")]
    AssetNotInGroup,

    #[msg("Invalid asset ratio")]
    InvalidAssetRatio,

    #[msg("Strategy was removed")]
    GhostStrategy,

    #[msg("Price feed is stale")]
    StalePrice,

    #[msg("Exchange rate is outside the caller's slippage bounds")]
    ExchangeRateOutOfSlippage,

    #[msg("Redeemed assets are below the caller's minimum")]
    RedeemSlippageExceeded,

    #[msg("Do-hard-work has not settled the requested index yet")]
    DhwNotRunYet,

    #[msg("Nothing was redeemed at the requested index")]
    NothingToClaim,

    #[msg("Insufficient strategy shares")]
    InsufficientShares,

    #[msg("Caller is not the registered vault manager")]
    InvalidVaultManager,

    #[msg("Invalid account pairs")]
    InvalidAccountPairs,
}
