pub mod asset_accounts;
pub mod token;
pub mod vault_manager;
