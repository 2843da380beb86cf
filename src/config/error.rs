//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Invalid engine setting: {0}")]
    InvalidEngineSetting(String),

    #[error("Invalid evaluation timeout (must be 1..=3600 seconds)")]
    InvalidTimeout,

    #[error("Report precision exceeds maximum allowed (12)")]
    PrecisionTooLarge,

    #[error("Invalid log filter directive: {0}")]
    InvalidLogFilter(String),
}
