pub mod config;
pub mod types;

pub use config::RelayConfig;
pub use types::*;
