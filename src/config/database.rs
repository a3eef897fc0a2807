//! Database configuration
//!
//! One pool serves two kinds of work: the expiry poller, which walks its rows
//! sequentially on a single connection, and HTTP requests, where every
//! guarded request reads one reseller snapshot. The guard fails closed, so a
//! request that cannot get a connection within `acquire_timeout_secs` is
//! answered with 503 instead of waiting for the request timeout.

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Connections the expiry poller holds while a pass runs.
pub const POLLER_CONNECTIONS: u32 = 1;

/// Upper bound on the pool; the service is read-mostly and small.
const MAX_POOL_SIZE: u32 = 50;

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Connections kept warm for the guard between bursts
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    /// Pool size shared by the poller and request handlers
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Seconds a request may wait for a connection before the guard gives up
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,

    /// Idle connection timeout in seconds
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,

    /// Apply the bundled schema migrations on startup
    #[serde(default)]
    pub run_migrations: bool,
}

impl DatabaseConfig {
    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }

    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }

    /// Connections left for HTTP requests while the poller runs.
    pub fn request_connections(&self, poller_enabled: bool) -> u32 {
        if poller_enabled {
            self.max_connections.saturating_sub(POLLER_CONNECTIONS)
        } else {
            self.max_connections
        }
    }

    /// Validate database configuration on its own
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.url.is_empty() {
            return Err(ValidationError::MissingRequired("database.url"));
        }
        if !self.url.starts_with("postgres://") && !self.url.starts_with("postgresql://") {
            return Err(ValidationError::InvalidDatabaseUrl);
        }
        if self.max_connections == 0 || self.min_connections > self.max_connections {
            return Err(ValidationError::InvalidPoolSize);
        }
        if self.max_connections > MAX_POOL_SIZE {
            return Err(ValidationError::PoolSizeTooLarge(MAX_POOL_SIZE));
        }
        if self.acquire_timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }

    /// Checks the pool against the poller and the HTTP request timeout.
    ///
    /// Requests must keep at least one connection while the poller runs, and
    /// acquiring a connection must time out before the request does.
    pub fn validate_against(
        &self,
        poller_enabled: bool,
        request_timeout: Duration,
    ) -> Result<(), ValidationError> {
        if self.request_connections(poller_enabled) == 0 {
            return Err(ValidationError::PoolStarvedByPoller);
        }
        if self.acquire_timeout() >= request_timeout {
            return Err(ValidationError::AcquireTimeoutTooLong);
        }
        Ok(())
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            min_connections: default_min_connections(),
            max_connections: default_max_connections(),
            acquire_timeout_secs: default_acquire_timeout(),
            idle_timeout_secs: default_idle_timeout(),
            run_migrations: false,
        }
    }
}

fn default_min_connections() -> u32 {
    1
}

fn default_max_connections() -> u32 {
    POLLER_CONNECTIONS + 8
}

fn default_acquire_timeout() -> u64 {
    5
}

fn default_idle_timeout() -> u64 {
    600
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_url() -> DatabaseConfig {
        DatabaseConfig {
            url: "postgres://billing@localhost/panel".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn defaults_leave_requests_eight_connections_beside_the_poller() {
        let config = with_url();
        assert_eq!(config.request_connections(true), 8);
        assert_eq!(config.request_connections(false), 9);
        assert!(config.validate().is_ok());
        assert!(config
            .validate_against(true, Duration::from_secs(30))
            .is_ok());
    }

    #[test]
    fn mysql_url_is_rejected() {
        let config = DatabaseConfig {
            url: "mysql://panel@localhost/billing".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidDatabaseUrl)
        ));
    }

    #[test]
    fn missing_url_names_the_setting() {
        assert!(matches!(
            DatabaseConfig::default().validate(),
            Err(ValidationError::MissingRequired("database.url"))
        ));
    }

    #[test]
    fn empty_or_inverted_pool_is_rejected() {
        let empty = DatabaseConfig {
            min_connections: 0,
            max_connections: 0,
            ..with_url()
        };
        assert!(matches!(empty.validate(), Err(ValidationError::InvalidPoolSize)));

        let inverted = DatabaseConfig {
            min_connections: 4,
            max_connections: 2,
            ..with_url()
        };
        assert!(matches!(inverted.validate(), Err(ValidationError::InvalidPoolSize)));
    }

    #[test]
    fn oversized_pool_is_rejected() {
        let config = DatabaseConfig {
            max_connections: MAX_POOL_SIZE + 1,
            ..with_url()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::PoolSizeTooLarge(_))
        ));
    }

    #[test]
    fn single_connection_pool_needs_the_poller_disabled() {
        let config = DatabaseConfig {
            max_connections: 1,
            ..with_url()
        };
        assert!(config.validate().is_ok());
        assert!(matches!(
            config.validate_against(true, Duration::from_secs(30)),
            Err(ValidationError::PoolStarvedByPoller)
        ));
        assert!(config
            .validate_against(false, Duration::from_secs(30))
            .is_ok());
    }

    #[test]
    fn acquire_timeout_must_be_shorter_than_request_timeout() {
        let config = DatabaseConfig {
            acquire_timeout_secs: 30,
            ..with_url()
        };
        assert!(matches!(
            config.validate_against(true, Duration::from_secs(30)),
            Err(ValidationError::AcquireTimeoutTooLong)
        ));

        let zero = DatabaseConfig {
            acquire_timeout_secs: 0,
            ..with_url()
        };
        assert!(matches!(zero.validate(), Err(ValidationError::InvalidTimeout)));
    }
}
