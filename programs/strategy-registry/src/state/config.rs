use anchor_lang::prelude::*;

#[account]
#[derive(Default, Debug, InitSpace)]
pub struct RegistryConfig {
    /// Program whose vault-authority PDAs may drive the ledger via CPI.
    pub vault_manager: Pubkey,
    pub next_strategy_index: u64,
    /// Oracle staleness limit, seconds.
    pub price_max_age: i64,
    pub bump: u8,
}
