#![deny(unsafe_code)]

//! Configuration loading and validation for the AEOS division router.
//!
//! Loads TOML configuration files and validates them before any registry is
//! assembled. Provides the [`AppConfig`] type as the central configuration
//! structure, and the [`division`] module for operator-defined divisions.

/// Schema for `[[divisions]]` tables.
pub mod division;

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

pub use division::{CaseConfig, DivisionConfig, ToolConfig};

/// Accepted values for `router.predicate` and `divisions[].predicate`.
pub const PREDICATE_KINDS: [&str; 2] = ["keywords", "always"];

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("validation error: {0}")]
    Validation(String),
}

/// Top-level application configuration.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Routing policy.
    #[serde(default)]
    pub router: RouterConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Cost ledger configuration.
    #[serde(default)]
    pub ledger: LedgerConfig,

    /// Operator-defined divisions, registered after the built-in catalog.
    #[serde(default)]
    pub divisions: Vec<DivisionConfig>,
}

/// Routing policy.
///
/// ## TOML Example
///
/// ```toml
/// [router]
/// predicate = "always"
/// catalog = true
/// fallback = false
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouterConfig {
    /// Default predicate for divisions: "keywords" or "always".
    #[serde(default = "default_predicate")]
    pub predicate: String,

    /// Register the built-in division catalog.
    #[serde(default = "default_true")]
    pub catalog: bool,

    /// Register the always-accepting core division last.
    #[serde(default = "default_true")]
    pub fallback: bool,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            predicate: default_predicate(),
            catalog: true,
            fallback: true,
        }
    }
}

fn default_predicate() -> String {
    "keywords".to_string()
}

fn default_true() -> bool {
    true
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g. "info", "debug", "trace").
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Cost ledger configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Maximum number of audit records retained (oldest evicted first).
    #[serde(default = "default_ledger_capacity")]
    pub capacity: usize,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            capacity: default_ledger_capacity(),
        }
    }
}

fn default_ledger_capacity() -> usize {
    256
}

impl AppConfig {
    /// Load configuration from a TOML file at the given path using async I/O.
    pub async fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = tokio::fs::read_to_string(path).await?;
        debug!(path = %path.display(), bytes = content.len(), "Read config file");
        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !PREDICATE_KINDS.contains(&self.router.predicate.as_str()) {
            return Err(ConfigError::Validation(format!(
                "router.predicate must be one of {:?}, got {:?}",
                PREDICATE_KINDS, self.router.predicate
            )));
        }
        if self.ledger.capacity == 0 {
            return Err(ConfigError::Validation(
                "ledger.capacity must be at least 1".to_string(),
            ));
        }

        let mut names = HashSet::new();
        let mut ids = HashSet::new();
        for (i, div) in self.divisions.iter().enumerate() {
            if div.name.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "divisions[{i}].name must not be empty"
                )));
            }
            if !names.insert(div.name.to_ascii_lowercase()) {
                return Err(ConfigError::Validation(format!(
                    "divisions[{i}].name {:?} is already defined",
                    div.name
                )));
            }
            let id = div.effective_id();
            if id.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "divisions[{i}].id must not be empty"
                )));
            }
            if !ids.insert(id.to_ascii_lowercase()) {
                return Err(ConfigError::Validation(format!(
                    "divisions[{i}].id {id:?} is already defined"
                )));
            }
            if !div.cost.is_finite() || div.cost < 0.0 {
                return Err(ConfigError::Validation(format!(
                    "divisions[{i}].cost must be a non-negative number, got {}",
                    div.cost
                )));
            }
            if let Some(predicate) = &div.predicate {
                if !PREDICATE_KINDS.contains(&predicate.as_str()) {
                    return Err(ConfigError::Validation(format!(
                        "divisions[{i}].predicate must be one of {:?}, got {:?}",
                        PREDICATE_KINDS, predicate
                    )));
                }
            }
            if div.triggers.iter().any(|t| t.trim().is_empty()) {
                return Err(ConfigError::Validation(format!(
                    "divisions[{i}].triggers must not contain empty keywords"
                )));
            }
            if div
                .fallback_response
                .as_ref()
                .is_some_and(|r| r.trim().is_empty())
            {
                return Err(ConfigError::Validation(format!(
                    "divisions[{i}].fallback_response must not be empty"
                )));
            }
            for (j, case) in div.cases.iter().enumerate() {
                if case.keywords.is_empty() || case.keywords.iter().any(|k| k.trim().is_empty()) {
                    return Err(ConfigError::Validation(format!(
                        "divisions[{i}].cases[{j}].keywords must be non-empty keywords"
                    )));
                }
                if case.response.trim().is_empty() {
                    return Err(ConfigError::Validation(format!(
                        "divisions[{i}].cases[{j}].response must not be empty"
                    )));
                }
            }
        }

        Ok(())
    }
}
