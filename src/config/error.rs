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
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid bind address")]
    InvalidBindAddress,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid assistant base URL")]
    InvalidBaseUrl,

    #[error("Polling attempts, budget and interval must all be non-zero")]
    InvalidPollPolicy,

    #[error("Polling budget must fit inside the request timeout")]
    PollBudgetExceedsTimeout,

    #[error("Rate limit window must be non-zero")]
    InvalidRateLimitWindow,

    #[error("Rate limit max requests must be non-zero")]
    InvalidRateLimitMax,
}
