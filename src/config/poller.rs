//! Expiry poller configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::domain::foundation::BusinessCalendar;

/// Background poller configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PollerConfig {
    /// Spawn the poller at startup
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Seconds between two runs
    #[serde(default = "default_interval")]
    pub interval_secs: u64,

    /// Offset of the business timezone from UTC, in hours
    #[serde(default)]
    pub utc_offset_hours: i32,
}

impl PollerConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    /// Calendar deciding what "today" means for reminders.
    pub fn calendar(&self) -> Result<BusinessCalendar, ValidationError> {
        BusinessCalendar::with_offset_hours(self.utc_offset_hours)
            .map_err(|_| ValidationError::InvalidUtcOffset)
    }

    /// Validate poller configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.interval_secs == 0 || self.interval_secs > 86_400 {
            return Err(ValidationError::InvalidPollInterval);
        }
        self.calendar()?;
        Ok(())
    }
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            interval_secs: default_interval(),
            utc_offset_hours: 0,
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_interval() -> u64 {
    300
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_poll_every_five_minutes() {
        let config = PollerConfig::default();
        assert!(config.enabled);
        assert_eq!(config.interval(), Duration::from_secs(300));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_interval_is_rejected() {
        let config = PollerConfig {
            interval_secs: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidPollInterval)
        ));
    }

    #[test]
    fn out_of_range_offset_is_rejected() {
        let config = PollerConfig {
            utc_offset_hours: 15,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidUtcOffset)
        ));
    }
}
