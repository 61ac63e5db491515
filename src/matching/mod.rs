//! Gift assignment for an exchange
//!
//! This module holds the constraint-aware matching engine along with the
//! checks around it: constraint sets, assignment verification and an optional
//! feasibility pre-check.

pub mod constraints;
pub mod engine;
pub mod feasibility;
pub mod verify;

// Re-export commonly used types
pub use constraints::ConstraintSet;
pub use engine::{GiftMatcher, MatcherConfig, RandomRestartMatcher, DEFAULT_MAX_ATTEMPTS};
pub use feasibility::{check_feasibility, Feasibility};
pub use verify::{constraint_violations, verify_assignment, verify_permutation};
