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

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid bind address: {0}")]
    InvalidBindAddress(String),

    #[error("Invalid database URL format")]
    InvalidDatabaseUrl,

    #[error("Pool needs max_connections >= 1 and min_connections <= max_connections")]
    InvalidPoolSize,

    #[error("Pool size exceeds maximum allowed ({0})")]
    PoolSizeTooLarge(u32),

    #[error("Pool leaves no connection for requests while the poller runs")]
    PoolStarvedByPoller,

    #[error("Database acquire timeout must be shorter than the request timeout")]
    AcquireTimeoutTooLong,

    #[error("Poller interval must be between 1 and 86400 seconds")]
    InvalidPollInterval,

    #[error("UTC offset must be between -14 and 14 hours")]
    InvalidUtcOffset,

    #[error("Invalid renewal path: {0}")]
    InvalidRenewalPath(&'static str),

    #[error("Renewal path {path} would shadow route {route}")]
    RenewalPathConflict { path: String, route: &'static str },
}
