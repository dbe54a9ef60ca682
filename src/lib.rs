//! # Settlement Core
//!
//! Settles a shared expense: given what each participant paid, computes the
//! fair per-person share and a short list of debtor to creditor transfers that
//! brings everyone's balance to zero.
//!
//! ## Features
//!
//! - **Equal-share settlement**: exact decimal balance arithmetic, rounding only on reported amounts
//! - **Greedy two-pointer matching**: at most `debtors + creditors - 1` transfers in linear time
//! - **Pluggable matching**: swap in [`ExactPairMatcher`] or your own [`MatchingStrategy`]
//! - **Configurable rounding**: whole units by default, cents or finer on request
//! - **Duplicate handling**: keep repeated names as separate entries or merge them
//! - **Validation helpers**: caller-side checks before a settlement runs
//! - **Drift audit**: measure how far rounded transfers move from exact balances
//!
//! ## Quick Start
//!
//! ```rust
//! use settlement_core::{settle, Contribution, Transfer};
//! use bigdecimal::BigDecimal;
//!
//! let result = settle(&[
//!     Contribution::new("Alice", 300),
//!     Contribution::new("Bob", 0),
//!     Contribution::new("Carol", 0),
//! ]);
//!
//! assert_eq!(result.average_share, BigDecimal::from(100));
//! assert_eq!(
//!     result.transfers,
//!     vec![
//!         Transfer::new("Bob", "Alice", BigDecimal::from(100)),
//!         Transfer::new("Carol", "Alice", BigDecimal::from(100)),
//!     ]
//! );
//! ```

pub mod engine;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use engine::*;
pub use traits::*;
pub use types::*;
pub use utils::rounding::{Payout, Rounding};
