use anchor_lang::prelude::*;

use crate::constants::MAX_ASSETS;
use crate::errors::ErrorCode;

/// Ordered list of accepted asset mints. Immutable once registered so every
/// per-asset array in the protocol indexes the same way forever.
#[account]
#[derive(Default, Debug, InitSpace)]
pub struct AssetGroup {
    pub id: u64,
    pub assets: [Pubkey; MAX_ASSETS],
    pub num_assets: u8,
    pub bump: u8,
}

impl AssetGroup {
    pub fn init(&mut self, id: u64, assets: &[Pubkey], bump: u8) -> Result<()> {
        if assets.is_empty() || assets.len() > MAX_ASSETS {
            return Err(ErrorCode::InvalidAssetGroup.into());
        }

        for (i, asset) in assets.iter().enumerate() {
            if *asset == Pubkey::default() || assets[..i].contains(asset) {
                return Err(ErrorCode::InvalidAssetGroup.into());
            }
            self.assets[i] = *asset;
        }

        self.id = id;
        self.num_assets = assets.len() as u8;
        self.bump = bump;
        Ok(())
    }

    pub fn assets(&self) -> &[Pubkey] {
        &self.assets[..self.num_assets as usize]
    }

    pub fn position(&self, asset: Pubkey) -> Result<usize> {
        self.assets()
            .iter()
            .position(|a| *a == asset)
            .ok_or(ErrorCode::AssetNotInGroup.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_duplicates_and_empty_groups() {
        let mut group = AssetGroup::default();
        assert!(group.init(1, &[], 0).is_err());

        let mint = Pubkey::new_unique();
        assert!(group.init(1, &[mint, mint], 0).is_err());
        assert!(group.init(1, &[mint, Pubkey::new_unique()], 0).is_ok());
        assert_eq!(group.num_assets, 2);
        assert_eq!(group.position(mint).unwrap(), 0);
        assert!(group.position(Pubkey::new_unique()).is_err());
    }
}
