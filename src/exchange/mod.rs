//! Gift exchanges built around the matching engine
//!
//! This module validates group requests, stores completed exchanges and
//! serves per-participant reveal lookups.

pub mod record;
pub mod request;
pub mod service;
pub mod store;

// Re-export commonly used types
pub use record::{Exchange, ExchangeSummary, ParticipantRecord, Reveal};
pub use request::{GroupRequest, IllegalPair, ValidatedGroup};
pub use service::ExchangeService;
pub use store::{ExchangeStore, InMemoryExchangeStore};
