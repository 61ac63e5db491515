//! Exchange storage interface and implementations
//!
//! This module defines the interface for persisting and retrieving exchanges,
//! with an in-memory implementation bounded by entry count.

use super::record::Exchange;
use crate::error::{ExchangeError, Result};
use crate::utils::normalise_name;
use std::collections::{HashMap, VecDeque};
use std::sync::RwLock;

/// Trait for exchange storage operations
///
/// Identifiers are matched case-insensitively.
#[cfg_attr(test, mockall::automock)]
pub trait ExchangeStore: Send + Sync {
    /// Store a new exchange, failing if its identifier is taken
    fn insert(&self, exchange: Exchange) -> Result<()>;

    /// Get an exchange by identifier
    fn get(&self, identifier: &str) -> Result<Option<Exchange>>;

    /// Whether an exchange with this identifier exists
    fn contains(&self, identifier: &str) -> Result<bool>;

    /// Number of stored exchanges
    fn count(&self) -> Result<usize>;
}

#[derive(Debug, Default)]
struct StoreInner {
    exchanges: HashMap<String, Exchange>,
    insertion_order: VecDeque<String>,
}

/// In-memory exchange storage
///
/// When more than `max_entries` exchanges are stored the oldest are evicted.
#[derive(Debug)]
pub struct InMemoryExchangeStore {
    inner: RwLock<StoreInner>,
    max_entries: usize,
}

impl InMemoryExchangeStore {
    /// Create a new in-memory exchange store
    pub fn new(max_entries: usize) -> Self {
        Self {
            inner: RwLock::new(StoreInner::default()),
            max_entries,
        }
    }
}

impl Default for InMemoryExchangeStore {
    fn default() -> Self {
        Self::new(10_000)
    }
}

fn lock_poisoned(kind: &str) -> ExchangeError {
    ExchangeError::InternalError {
        message: format!("Failed to acquire exchange store {} lock", kind),
    }
}

impl ExchangeStore for InMemoryExchangeStore {
    fn insert(&self, exchange: Exchange) -> Result<()> {
        let mut inner = self.inner.write().map_err(|_| lock_poisoned("write"))?;

        let key = normalise_name(&exchange.identifier);
        if inner.exchanges.contains_key(&key) {
            return Err(ExchangeError::IdentifierTaken {
                identifier: exchange.identifier,
            }
            .into());
        }

        inner.exchanges.insert(key.clone(), exchange);
        inner.insertion_order.push_back(key);

        while inner.exchanges.len() > self.max_entries {
            match inner.insertion_order.pop_front() {
                Some(oldest) => {
                    inner.exchanges.remove(&oldest);
                }
                None => break,
            }
        }

        Ok(())
    }

    fn get(&self, identifier: &str) -> Result<Option<Exchange>> {
        let inner = self.inner.read().map_err(|_| lock_poisoned("read"))?;
        Ok(inner.exchanges.get(&normalise_name(identifier)).cloned())
    }

    fn contains(&self, identifier: &str) -> Result<bool> {
        let inner = self.inner.read().map_err(|_| lock_poisoned("read"))?;
        Ok(inner.exchanges.contains_key(&normalise_name(identifier)))
    }

    fn count(&self) -> Result<usize> {
        let inner = self.inner.read().map_err(|_| lock_poisoned("read"))?;
        Ok(inner.exchanges.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Assignment, Pair};
    use crate::utils::{current_timestamp, generate_exchange_id};

    fn exchange(identifier: &str) -> Exchange {
        Exchange {
            id: generate_exchange_id(),
            identifier: identifier.to_string(),
            description: None,
            participants: vec![],
            assignment: Assignment::new(vec![Pair::new("A", "B"), Pair::new("B", "A")]),
            degraded: false,
            constraint_count: 0,
            created_at: current_timestamp(),
        }
    }

    #[test]
    fn test_insert_and_get_case_insensitive() {
        let store = InMemoryExchangeStore::default();
        store.insert(exchange("JollyCinnamonSleigh")).unwrap();

        assert!(store.contains("jollycinnamonsleigh").unwrap());
        let stored = store.get("JOLLYCINNAMONSLEIGH").unwrap().unwrap();
        assert_eq!(stored.identifier, "JollyCinnamonSleigh");
        assert!(store.get("MerryHollyWreath").unwrap().is_none());
    }

    #[test]
    fn test_duplicate_identifier_rejected() {
        let store = InMemoryExchangeStore::default();
        store.insert(exchange("JollyCinnamonSleigh")).unwrap();

        let err = store.insert(exchange("jollyCinnamonSleigh")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ExchangeError>(),
            Some(ExchangeError::IdentifierTaken { .. })
        ));
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn test_oldest_evicted_over_capacity() {
        let store = InMemoryExchangeStore::new(2);
        store.insert(exchange("FirstCinnamonSleigh")).unwrap();
        store.insert(exchange("SecondCinnamonSleigh")).unwrap();
        store.insert(exchange("ThirdCinnamonSleigh")).unwrap();

        assert_eq!(store.count().unwrap(), 2);
        assert!(!store.contains("FirstCinnamonSleigh").unwrap());
        assert!(store.contains("ThirdCinnamonSleigh").unwrap());
    }
}
