pub mod claim_vault_tokens;
pub mod claim_withdrawal;
pub mod deposit;
pub mod flush_vault;
pub mod initialize;
pub mod reallocate;
pub mod rebalance;
pub mod redeem;
pub mod redeem_fast;
pub mod register_vault;
pub mod remove_vault_strategy;
pub mod set_role;
pub mod set_vault_access;
pub mod shutdown_vault;
pub mod sync_vault;

pub use claim_vault_tokens::*;
pub use claim_withdrawal::*;
pub use deposit::*;
pub use flush_vault::*;
pub use initialize::*;
pub use reallocate::*;
pub use rebalance::*;
pub use redeem::*;
pub use redeem_fast::*;
pub use register_vault::*;
pub use remove_vault_strategy::*;
pub use set_role::*;
pub use set_vault_access::*;
pub use shutdown_vault::*;
pub use sync_vault::*;
