//! Wichteln - constraint-aware Secret Santa matching
//!
//! This crate assigns every member of a gift exchange exactly one other member
//! to gift, honouring forbidden giver → receiver pairs, and provides request
//! validation, identifiers, an in-memory exchange store and metrics around it.

pub mod config;
pub mod error;
pub mod exchange;
pub mod identifier;
pub mod matching;
pub mod metrics;
pub mod types;
pub mod utils;

// Re-export commonly used types and traits
pub use error::{ExchangeError, Result};
pub use types::*;

// Re-export key components
pub use exchange::{ExchangeService, ExchangeStore, GroupRequest, InMemoryExchangeStore};
pub use matching::{ConstraintSet, GiftMatcher, MatcherConfig, RandomRestartMatcher};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
