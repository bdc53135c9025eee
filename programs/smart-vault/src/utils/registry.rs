use crate::constants::VAULT_AUTHORITY_SEED;

/// Signer seeds of the vault authority PDA the registry trusts for this
/// vault. Must match the derivation `assert_vault_authority` checks on the
/// registry side.
pub fn vault_authority_seeds<'a>(vault_key: &'a [u8], bump: &'a u8) -> [&'a [u8]; 3] {
    [
        VAULT_AUTHORITY_SEED.as_bytes(),
        vault_key,
        std::slice::from_ref(bump),
    ]
}
