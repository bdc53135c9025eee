use anchor_lang::prelude::*;

use crate::constants::{MAX_ASSETS, NFT_UNIT};
use crate::errors::ErrorCode;

/// Claim ticket for a queued deposit. Carries a fractional balance in
/// NFT_UNIT terms so a holder can claim the minted SVTs piecemeal.
#[account]
#[derive(Default, Debug, InitSpace)]
pub struct DepositReceipt {
    pub vault: Pubkey,
    pub owner: Pubkey,
    pub nft_id: u64,
    pub flush_index: u64,
    pub bump: u8,

    pub amounts: [u64; MAX_ASSETS],
    pub referral: Pubkey,
    pub balance: u64,
    pub timestamp: i64,
}

impl DepositReceipt {
    #[allow(clippy::too_many_arguments)]
    pub fn init(
        &mut self,
        vault: Pubkey,
        owner: Pubkey,
        nft_id: u64,
        flush_index: u64,
        bump: u8,
        amounts: &[u64],
        referral: Pubkey,
        timestamp: i64,
    ) {
        self.vault = vault;
        self.owner = owner;
        self.nft_id = nft_id;
        self.flush_index = flush_index;
        self.bump = bump;
        self.amounts[..amounts.len()].copy_from_slice(amounts);
        self.referral = referral;
        self.balance = NFT_UNIT;
        self.timestamp = timestamp;
    }

    pub fn burn(&mut self, fraction: u64) -> Result<()> {
        burn_fraction(&mut self.balance, fraction)
    }
}

/// Claim ticket for a queued redemption, same fractional model as
/// [`DepositReceipt`].
#[account]
#[derive(Default, Debug, InitSpace)]
pub struct WithdrawalReceipt {
    pub vault: Pubkey,
    pub owner: Pubkey,
    pub nft_id: u64,
    pub flush_index: u64,
    pub bump: u8,

    pub svt_shares: u64,
    pub balance: u64,
    pub timestamp: i64,
}

impl WithdrawalReceipt {
    #[allow(clippy::too_many_arguments)]
    pub fn init(
        &mut self,
        vault: Pubkey,
        owner: Pubkey,
        nft_id: u64,
        flush_index: u64,
        bump: u8,
        svt_shares: u64,
        timestamp: i64,
    ) {
        self.vault = vault;
        self.owner = owner;
        self.nft_id = nft_id;
        self.flush_index = flush_index;
        self.bump = bump;
        self.svt_shares = svt_shares;
        self.balance = NFT_UNIT;
        self.timestamp = timestamp;
    }

    pub fn burn(&mut self, fraction: u64) -> Result<()> {
        burn_fraction(&mut self.balance, fraction)
    }
}

fn burn_fraction(balance: &mut u64, fraction: u64) -> Result<()> {
    if fraction == 0 {
        return Err(ErrorCode::ZeroValue.into());
    }
    if fraction > *balance {
        return Err(ErrorCode::InsufficientReceiptBalance.into());
    }

    *balance -= fraction;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_receipts_carry_a_whole_unit() {
        let mut receipt = DepositReceipt::default();
        receipt.init(
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            1,
            1,
            255,
            &[1_000],
            Pubkey::default(),
            0,
        );
        assert_eq!(receipt.balance, NFT_UNIT);
    }

    #[test]
    fn partial_burns_accumulate_to_the_whole() {
        let mut receipt = WithdrawalReceipt::default();
        receipt.init(Pubkey::new_unique(), Pubkey::new_unique(), 1, 1, 255, 500, 0);

        receipt.burn(NFT_UNIT / 4).unwrap();
        receipt.burn(NFT_UNIT / 4).unwrap();
        assert_eq!(receipt.balance, NFT_UNIT / 2);

        receipt.burn(NFT_UNIT / 2).unwrap();
        assert_eq!(receipt.balance, 0);
        assert!(receipt.burn(1).is_err());
    }

    #[test]
    fn zero_burn_is_rejected() {
        let mut receipt = DepositReceipt::default();
        receipt.balance = NFT_UNIT;
        assert!(receipt.burn(0).is_err());
    }
}
