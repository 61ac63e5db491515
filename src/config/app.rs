//! Main application configuration
//!
//! This module defines the primary configuration structures for wichteln,
//! including environment variable and TOML file loading plus validation.

use crate::matching::{MatcherConfig, DEFAULT_MAX_ATTEMPTS};
use crate::utils::DEFAULT_CODE_LENGTH;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceSettings,
    pub matching: MatchingSettings,
    pub exchange: ExchangeSettings,
}

/// Service-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Service name for logging and metrics
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

/// Matching engine settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingSettings {
    /// Random permutations tried before the rotation fallback
    pub max_attempts: u32,
    /// Fixed seed for reproducible assignments
    pub seed: Option<u64>,
    /// Treat a degraded assignment as an error instead of accepting it
    pub reject_degraded: bool,
    /// Refuse infeasible constraint sets before searching
    pub check_feasibility: bool,
}

/// Exchange validation and storage settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExchangeSettings {
    /// Length of generated participant codes
    pub code_length: usize,
    /// Maximum description length in characters
    pub max_description_length: usize,
    /// Minimum identifier length in characters
    pub min_identifier_length: usize,
    /// Maximum identifier length in characters
    pub max_identifier_length: usize,
    /// Maximum exchanges kept by the in-memory store
    pub max_exchanges: usize,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            name: "wichteln".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            seed: None,
            reject_degraded: false,
            check_feasibility: false,
        }
    }
}

impl Default for ExchangeSettings {
    fn default() -> Self {
        Self {
            code_length: DEFAULT_CODE_LENGTH,
            max_description_length: 500,
            min_identifier_length: 6,
            max_identifier_length: 80,
            max_exchanges: 10_000,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML file, then apply environment overrides
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let mut config = Self::parse_toml(&contents)?;
        config.apply_env()?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Parse and validate configuration from a TOML string
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config = Self::parse_toml(contents)?;
        validate_config(&config)?;
        Ok(config)
    }

    fn parse_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| anyhow!("Invalid configuration file: {}", e))
    }

    fn apply_env(&mut self) -> Result<()> {
        // Service settings
        if let Ok(name) = env::var("SERVICE_NAME") {
            self.service.name = name;
        }
        if let Ok(log_level) = env::var("LOG_LEVEL") {
            self.service.log_level = log_level;
        }

        // Matching settings
        if let Ok(attempts) = env::var("MATCH_MAX_ATTEMPTS") {
            self.matching.max_attempts = attempts
                .parse()
                .map_err(|_| anyhow!("Invalid MATCH_MAX_ATTEMPTS value: {}", attempts))?;
        }
        if let Ok(seed) = env::var("MATCH_SEED") {
            self.matching.seed = Some(
                seed.parse()
                    .map_err(|_| anyhow!("Invalid MATCH_SEED value: {}", seed))?,
            );
        }
        if let Ok(reject) = env::var("MATCH_REJECT_DEGRADED") {
            self.matching.reject_degraded = reject
                .parse()
                .map_err(|_| anyhow!("Invalid MATCH_REJECT_DEGRADED value: {}", reject))?;
        }
        if let Ok(check) = env::var("MATCH_CHECK_FEASIBILITY") {
            self.matching.check_feasibility = check
                .parse()
                .map_err(|_| anyhow!("Invalid MATCH_CHECK_FEASIBILITY value: {}", check))?;
        }

        // Exchange settings
        if let Ok(length) = env::var("PARTICIPANT_CODE_LENGTH") {
            self.exchange.code_length = length
                .parse()
                .map_err(|_| anyhow!("Invalid PARTICIPANT_CODE_LENGTH value: {}", length))?;
        }
        if let Ok(max) = env::var("MAX_EXCHANGES") {
            self.exchange.max_exchanges = max
                .parse()
                .map_err(|_| anyhow!("Invalid MAX_EXCHANGES value: {}", max))?;
        }

        Ok(())
    }

    /// Matcher configuration derived from the matching settings
    pub fn matcher_config(&self) -> MatcherConfig {
        MatcherConfig::default().with_max_attempts(self.matching.max_attempts)
    }
}

/// Validate configuration values
pub fn validate_config(config: &AppConfig) -> Result<()> {
    // Validate log level
    match config.service.log_level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return Err(anyhow!("Invalid log level: {}", config.service.log_level)),
    }

    if config.service.name.is_empty() {
        return Err(anyhow!("Service name cannot be empty"));
    }

    // Validate matching settings
    if config.matching.max_attempts == 0 {
        return Err(anyhow!("Max attempts must be greater than 0"));
    }

    // Validate exchange settings
    if config.exchange.code_length == 0 {
        return Err(anyhow!("Participant code length must be greater than 0"));
    }
    if config.exchange.min_identifier_length > config.exchange.max_identifier_length {
        return Err(anyhow!(
            "Minimum identifier length {} exceeds maximum {}",
            config.exchange.min_identifier_length,
            config.exchange.max_identifier_length
        ));
    }
    if config.exchange.max_exchanges == 0 {
        return Err(anyhow!("Max exchanges must be greater than 0"));
    }

    Ok(())
}
