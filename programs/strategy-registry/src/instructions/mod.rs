pub mod add_deposits;
pub mod add_withdrawals;
pub mod deposit_fast;
pub mod do_hard_work;
pub mod init_master_wallet;
pub mod initialize;
pub mod redeem_fast;
pub mod register_asset_group;
pub mod register_strategy;
pub mod release_assets;
pub mod remove_strategy;
pub mod set_price;
pub mod set_role;

pub use add_deposits::*;
pub use add_withdrawals::*;
pub use deposit_fast::*;
pub use do_hard_work::*;
pub use init_master_wallet::*;
pub use initialize::*;
pub use redeem_fast::*;
pub use register_asset_group::*;
pub use register_strategy::*;
pub use release_assets::*;
pub use remove_strategy::*;
pub use set_price::*;
pub use set_role::*;
