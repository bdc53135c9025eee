use anchor_lang::prelude::*;

/// Program-wide config. Points at the registry deployment every vault of
/// this program settles against.
#[account]
#[derive(Default, Debug, InitSpace)]
pub struct VaultsConfig {
    pub registry_config: Pubkey,
    pub next_vault_index: u64,
    pub bump: u8,
}
