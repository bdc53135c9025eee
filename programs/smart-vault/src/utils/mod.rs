pub mod registry;
pub mod token;
pub mod vault_accounts;
