//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, pool size > 0)
//! - Require a file-backed database
//! - Check that addresses parse before anything tries to bind them
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ChatConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::ChatConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: invalid socket address {value:?}")]
    InvalidAddress { field: &'static str, value: String },

    #[error("{field}: must not be empty")]
    Empty { field: &'static str },

    #[error("{field}: must be greater than zero")]
    Zero { field: &'static str },

    #[error("database.path: {0:?} is in-memory; a file path is required")]
    InMemoryDatabase(String),

    #[error("observability.log_level: unknown level {0:?}")]
    UnknownLogLevel(String),
}

/// Check a parsed configuration, collecting every error found.
pub fn validate_config(config: &ChatConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.server.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "server.bind_address",
            value: config.server.bind_address.clone(),
        });
    }
    if config.server.request_timeout_secs == 0 {
        errors.push(ValidationError::Zero { field: "server.request_timeout_secs" });
    }

    if config.database.path.trim().is_empty() {
        errors.push(ValidationError::Empty { field: "database.path" });
    }
    if config.database.is_in_memory() {
        errors.push(ValidationError::InMemoryDatabase(config.database.path.clone()));
    }
    if config.database.max_connections == 0 {
        errors.push(ValidationError::Zero { field: "database.max_connections" });
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::UnknownLogLevel(
            config.observability.log_level.clone(),
        ));
    }
    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
