//! Metrics for wichteln
//!
//! This module provides Prometheus metrics for matching runs and exchange
//! activity.

pub mod collector;

pub use collector::{ExchangeMetrics, MatchingMetrics, MetricsCollector, MetricsTimer};
