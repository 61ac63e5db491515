//! Metrics collection using Prometheus
//!
//! This module records matching outcomes and exchange activity on a
//! Prometheus registry and renders them in the text exposition format.

use crate::types::MatchOutcome;
use anyhow::Result;
use prometheus::{
    Histogram, HistogramOpts, IntCounter, IntCounterVec, IntGauge, Opts, Registry, TextEncoder,
};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Main metrics collector
#[derive(Clone)]
pub struct MetricsCollector {
    /// Prometheus registry
    registry: Arc<Registry>,

    /// Matching engine metrics
    matching_metrics: MatchingMetrics,

    /// Exchange lifecycle metrics
    exchange_metrics: ExchangeMetrics,
}

/// Matching engine metrics
#[derive(Clone)]
pub struct MatchingMetrics {
    /// Matching runs by outcome (success, degraded)
    pub runs_total: IntCounterVec,

    /// Random permutations tried per run
    pub attempts: Histogram,

    /// Time spent in the matcher
    pub duration_seconds: Histogram,
}

/// Exchange lifecycle metrics
#[derive(Clone)]
pub struct ExchangeMetrics {
    /// Exchanges stored
    pub exchanges_created_total: IntCounter,

    /// Exchanges refused, by reason
    pub exchanges_rejected_total: IntCounterVec,

    /// Reveal lookups by status (found, not_found)
    pub reveals_total: IntCounterVec,

    /// Exchanges currently held by the store
    pub stored_exchanges: IntGauge,
}

impl MetricsCollector {
    /// Create a new metrics collector with default registry
    pub fn new() -> Result<Self> {
        let registry = Arc::new(Registry::new());
        Self::with_registry(registry)
    }

    /// Create a new metrics collector with custom registry
    pub fn with_registry(registry: Arc<Registry>) -> Result<Self> {
        let matching_metrics = MatchingMetrics::new(&registry)?;
        let exchange_metrics = ExchangeMetrics::new(&registry)?;

        Ok(Self {
            registry,
            matching_metrics,
            exchange_metrics,
        })
    }

    /// Get the Prometheus registry
    pub fn registry(&self) -> Arc<Registry> {
        self.registry.clone()
    }

    /// Get matching metrics
    pub fn matching(&self) -> &MatchingMetrics {
        &self.matching_metrics
    }

    /// Get exchange metrics
    pub fn exchange(&self) -> &ExchangeMetrics {
        &self.exchange_metrics
    }

    /// Record a finished matching run
    pub fn record_matching(&self, outcome: &MatchOutcome, duration: Duration) {
        self.matching_metrics
            .runs_total
            .with_label_values(&[outcome.label()])
            .inc();

        self.matching_metrics
            .attempts
            .observe(f64::from(outcome.attempts()));

        self.matching_metrics
            .duration_seconds
            .observe(duration.as_secs_f64());
    }

    /// Record an exchange being stored
    pub fn record_exchange_created(&self, stored_exchanges: usize) {
        self.exchange_metrics.exchanges_created_total.inc();
        self.exchange_metrics
            .stored_exchanges
            .set(stored_exchanges as i64);
    }

    /// Record an exchange being refused
    pub fn record_exchange_rejected(&self, reason: &str) {
        self.exchange_metrics
            .exchanges_rejected_total
            .with_label_values(&[reason])
            .inc();
    }

    /// Record a reveal lookup
    pub fn record_reveal(&self, found: bool) {
        let status = if found { "found" } else { "not_found" };

        self.exchange_metrics
            .reveals_total
            .with_label_values(&[status])
            .inc();
    }

    /// Render all metrics in the Prometheus text format
    pub fn gather(&self) -> Result<String> {
        let metric_families = self.registry.gather();
        let encoder = TextEncoder::new();
        encoder
            .encode_to_string(&metric_families)
            .map_err(|e| anyhow::anyhow!("Failed to encode metrics: {}", e))
    }

    /// Create a timer for measuring operation duration
    pub fn start_timer(&self) -> MetricsTimer {
        MetricsTimer::new()
    }
}

/// Timer for measuring operation durations
pub struct MetricsTimer {
    start: Instant,
}

impl MetricsTimer {
    fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Get the elapsed duration
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Stop the timer and return the duration
    pub fn stop(self) -> Duration {
        self.elapsed()
    }
}

impl MatchingMetrics {
    fn new(registry: &Registry) -> Result<Self> {
        let runs_total = IntCounterVec::new(
            Opts::new("wichteln_matching_runs_total", "Matching runs by outcome"),
            &["outcome"],
        )?;
        registry.register(Box::new(runs_total.clone()))?;

        let attempts = Histogram::with_opts(
            HistogramOpts::new(
                "wichteln_matching_attempts",
                "Random permutations tried per matching run",
            )
            .buckets(vec![1.0, 2.0, 5.0, 10.0, 50.0, 100.0, 500.0, 1000.0, 5000.0]),
        )?;
        registry.register(Box::new(attempts.clone()))?;

        let duration_seconds = Histogram::with_opts(
            HistogramOpts::new(
                "wichteln_matching_duration_seconds",
                "Time spent searching for an assignment",
            )
            .buckets(vec![0.00001, 0.0001, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5]),
        )?;
        registry.register(Box::new(duration_seconds.clone()))?;

        Ok(Self {
            runs_total,
            attempts,
            duration_seconds,
        })
    }
}

impl ExchangeMetrics {
    fn new(registry: &Registry) -> Result<Self> {
        let exchanges_created_total =
            IntCounter::new("wichteln_exchanges_created_total", "Exchanges created")?;
        registry.register(Box::new(exchanges_created_total.clone()))?;

        let exchanges_rejected_total = IntCounterVec::new(
            Opts::new(
                "wichteln_exchanges_rejected_total",
                "Exchanges refused by reason",
            ),
            &["reason"],
        )?;
        registry.register(Box::new(exchanges_rejected_total.clone()))?;

        let reveals_total = IntCounterVec::new(
            Opts::new("wichteln_reveals_total", "Reveal lookups by status"),
            &["status"],
        )?;
        registry.register(Box::new(reveals_total.clone()))?;

        let stored_exchanges =
            IntGauge::new("wichteln_stored_exchanges", "Exchanges held in the store")?;
        registry.register(Box::new(stored_exchanges.clone()))?;

        Ok(Self {
            exchanges_created_total,
            exchanges_rejected_total,
            reveals_total,
            stored_exchanges,
        })
    }
}
