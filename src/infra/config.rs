//! Centralized configuration (environment variables + defaults).

use crate::domain::dataset::{Dataset, DEFAULT_DATASET};

const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} is invalid: {reason}")]
    Invalid { name: &'static str, reason: String },
}

fn var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Database URL must be provided (no default) for safety.
pub fn database_url() -> Result<String, ConfigError> {
    var("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))
}

/// Dataset to seed, from `SEED_DATASET` (default: canonical).
pub fn seed_dataset() -> Result<Dataset, ConfigError> {
    dataset_named(var("SEED_DATASET").as_deref().unwrap_or(DEFAULT_DATASET))
}

pub fn dataset_named(name: &str) -> Result<Dataset, ConfigError> {
    Dataset::by_name(name).ok_or_else(|| ConfigError::Invalid {
        name: "SEED_DATASET",
        reason: format!(
            "unknown dataset '{}' (expected one of: {})",
            name,
            Dataset::names().join(", ")
        ),
    })
}

/// Pool size, from `DB_MAX_CONNECTIONS` (default 5, at least 1).
pub fn max_connections() -> Result<u32, ConfigError> {
    parse_max_connections(var("DB_MAX_CONNECTIONS"))
}

fn parse_max_connections(raw: Option<String>) -> Result<u32, ConfigError> {
    match raw {
        None => Ok(DEFAULT_MAX_CONNECTIONS),
        Some(v) => v
            .trim()
            .parse::<u32>()
            .map(|n| n.max(1))
            .map_err(|e| ConfigError::Invalid {
                name: "DB_MAX_CONNECTIONS",
                reason: format!("'{}': {}", v, e),
            }),
    }
}
