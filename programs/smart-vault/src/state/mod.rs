pub mod config;
pub mod flush_batch;
pub mod guard;
pub mod receipt;
pub mod roles;
pub mod vault;

pub use config::*;
pub use flush_batch::*;
pub use guard::*;
pub use receipt::*;
pub use roles::*;
pub use vault::*;
