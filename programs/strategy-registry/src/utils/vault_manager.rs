use anchor_lang::prelude::*;

use crate::errors::ErrorCode;
use crate::state::RegistryConfig;

pub const VAULT_AUTHORITY_SEED: &str = "vault_authority";

/// Ledger mutations on behalf of a vault must be signed by the vault-manager
/// program's per-vault authority PDA; that derivation is checked here.
pub fn assert_vault_authority(
    config: &RegistryConfig,
    vault: &Pubkey,
    vault_authority: &Pubkey,
) -> Result<()> {
    let (expected, _) = Pubkey::find_program_address(
        &[VAULT_AUTHORITY_SEED.as_bytes(), vault.as_ref()],
        &config.vault_manager,
    );

    if expected != *vault_authority {
        return Err(ErrorCode::InvalidVaultManager.into());
    }

    Ok(())
}
