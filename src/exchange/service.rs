//! Exchange orchestration
//!
//! Ties request validation, the matcher, participant codes and the store
//! together, and records metrics for each step when a collector is attached.

use super::record::{Exchange, ParticipantRecord, Reveal};
use super::request::GroupRequest;
use super::store::{ExchangeStore, InMemoryExchangeStore};
use crate::config::AppConfig;
use crate::error::{ExchangeError, Result};
use crate::matching::{
    check_feasibility, constraint_violations, Feasibility, GiftMatcher, RandomRestartMatcher,
};
use crate::metrics::MetricsCollector;
use crate::utils::{current_timestamp, generate_exchange_id, generate_participant_codes};
use rand::RngCore;
use std::sync::Arc;
use tracing::{info, warn};

/// Creates exchanges and answers reveal lookups
pub struct ExchangeService {
    config: AppConfig,
    matcher: Arc<dyn GiftMatcher>,
    store: Arc<dyn ExchangeStore>,
    metrics: Option<Arc<MetricsCollector>>,
}

impl ExchangeService {
    pub fn new(
        config: AppConfig,
        matcher: Arc<dyn GiftMatcher>,
        store: Arc<dyn ExchangeStore>,
    ) -> Self {
        Self {
            config,
            matcher,
            store,
            metrics: None,
        }
    }

    /// Build a service with the default matcher and an in-memory store
    pub fn from_config(config: AppConfig) -> Result<Self> {
        let matcher = RandomRestartMatcher::new(config.matcher_config())?;
        let store = InMemoryExchangeStore::new(config.exchange.max_exchanges);
        Ok(Self::new(config, Arc::new(matcher), Arc::new(store)))
    }

    /// Attach a metrics collector
    pub fn with_metrics(mut self, metrics: Arc<MetricsCollector>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn store(&self) -> Arc<dyn ExchangeStore> {
        self.store.clone()
    }

    /// Validate a group request, assign gifts and store the exchange
    pub fn create_exchange(
        &self,
        request: &GroupRequest,
        rng: &mut dyn RngCore,
    ) -> Result<Exchange> {
        let group = match request.validate(&self.config.exchange) {
            Ok(group) => group,
            Err(e) => {
                self.record_rejection("invalid_request");
                return Err(e.into());
            }
        };

        if self.store.contains(&group.identifier)? {
            self.record_rejection("identifier_taken");
            return Err(ExchangeError::IdentifierTaken {
                identifier: group.identifier,
            }
            .into());
        }

        if self.config.matching.check_feasibility {
            if let Feasibility::Infeasible { unmatched } =
                check_feasibility(&group.participants, &group.constraints)?
            {
                self.record_rejection("infeasible");
                return Err(ExchangeError::InfeasibleConstraints {
                    reason: format!("{} cannot be assigned anyone to gift", unmatched),
                }
                .into());
            }
        }

        let timer = self.metrics.as_ref().map(|metrics| metrics.start_timer());
        let outcome = self
            .matcher
            .assign(&group.participants, &group.constraints, &mut *rng)?;
        if let (Some(metrics), Some(timer)) = (&self.metrics, timer) {
            metrics.record_matching(&outcome, timer.stop());
        }

        if outcome.is_degraded() {
            if self.config.matching.reject_degraded {
                self.record_rejection("degraded");
                return Err(ExchangeError::DegradedAssignmentRejected.into());
            }

            let violations = constraint_violations(outcome.assignment(), &group.constraints);
            warn!(
                identifier = %group.identifier,
                violations = violations.len(),
                "Accepting degraded assignment"
            );
        }

        let codes = generate_participant_codes(
            &mut *rng,
            group.participants.len(),
            self.config.exchange.code_length,
        )?;
        let participants = group
            .participants
            .iter()
            .zip(codes)
            .map(|(name, code)| ParticipantRecord {
                name: name.clone(),
                code,
            })
            .collect();

        let exchange = Exchange {
            id: generate_exchange_id(),
            identifier: group.identifier,
            description: group.description,
            participants,
            degraded: outcome.is_degraded(),
            assignment: outcome.into_assignment(),
            constraint_count: group.constraints.len(),
            created_at: current_timestamp(),
        };

        self.store.insert(exchange.clone())?;
        if let Some(metrics) = &self.metrics {
            metrics.record_exchange_created(self.store.count()?);
        }

        info!(
            identifier = %exchange.identifier,
            participants = exchange.participants.len(),
            illegal_pairs = exchange.constraint_count,
            degraded = exchange.degraded,
            "Exchange created"
        );

        Ok(exchange)
    }

    /// Look up whom the named participant gifts
    pub fn reveal(&self, identifier: &str, name: &str) -> Result<Reveal> {
        let result = self.lookup(identifier, |exchange| exchange.reveal(name));
        self.record_reveal(result.is_ok());
        result
    }

    /// Look up whom the participant holding `code` gifts
    pub fn reveal_by_code(&self, identifier: &str, code: &str) -> Result<Reveal> {
        let result = self.lookup(identifier, |exchange| exchange.reveal_by_code(code));
        self.record_reveal(result.is_ok());
        result
    }

    fn lookup<F>(&self, identifier: &str, reveal: F) -> Result<Reveal>
    where
        F: FnOnce(&Exchange) -> std::result::Result<Reveal, ExchangeError>,
    {
        let exchange = self
            .store
            .get(identifier)?
            .ok_or_else(|| ExchangeError::ExchangeNotFound {
                identifier: identifier.trim().to_string(),
            })?;

        let reveal = reveal(&exchange)?;
        info!(identifier = %exchange.identifier, "Reveal lookup served");
        Ok(reveal)
    }

    fn record_rejection(&self, reason: &str) {
        if let Some(metrics) = &self.metrics {
            metrics.record_exchange_rejected(reason);
        }
    }

    fn record_reveal(&self, found: bool) {
        if let Some(metrics) = &self.metrics {
            metrics.record_reveal(found);
        }
    }
}
