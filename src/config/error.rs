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
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Endpoint URL must use http or https: {0}")]
    InvalidEndpointUrl(String),

    #[error("Endpoint must use HTTPS in production")]
    EndpointMustBeHttps,

    #[error("Invalid {0} timeout (must be 1-300 seconds)")]
    InvalidTimeout(&'static str),

    #[error("Retry count exceeds maximum allowed (10)")]
    TooManyRetries,

    #[error("Poll interval must be at least one second")]
    InvalidPollInterval,
}
