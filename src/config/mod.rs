//! Application configuration module
//!
//! Configuration is loaded from environment variables with the
//! `RESELLER_BILLING` prefix; nested values use `__` as separator.
//!
//! # Example
//!
//! ```no_run
//! use reseller_billing::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod database;
mod error;
mod guard;
mod poller;
mod server;

pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use guard::GuardConfig;
pub use poller::PollerConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment, logging)
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration (PostgreSQL connection)
    pub database: DatabaseConfig,

    /// Expiry poller schedule and business timezone
    #[serde(default)]
    pub poller: PollerConfig,

    /// Access guard settings
    #[serde(default)]
    pub guard: GuardConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Loads `.env` if present, then reads `RESELLER_BILLING__*` variables:
    ///
    /// - `RESELLER_BILLING__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `RESELLER_BILLING__DATABASE__URL=...` -> `database.url = ...`
    /// - `RESELLER_BILLING__POLLER__INTERVAL_SECS=60` -> `poller.interval_secs = 60`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or cannot be
    /// parsed.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("RESELLER_BILLING")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.poller.validate()?;
        self.guard.validate()?;
        self.database
            .validate_against(self.poller.enabled, self.server.request_timeout())?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
