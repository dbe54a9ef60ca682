//! Settlement engine: balance derivation, matching policies and auditing

pub mod audit;
pub mod balance;
pub mod config;
pub mod core;
pub mod matcher;

pub use audit::*;
pub use balance::*;
pub use config::*;
pub use self::core::*;
pub use matcher::*;
