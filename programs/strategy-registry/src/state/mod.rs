pub mod asset_group;
pub mod config;
pub mod dhw;
pub mod oracle;
pub mod roles;
pub mod strategy;

pub use asset_group::*;
pub use config::*;
pub use dhw::*;
pub use oracle::*;
pub use roles::*;
pub use strategy::*;
