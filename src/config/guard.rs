//! Access guard configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::adapters::http::FIXED_ROUTES;

/// Access guard configuration
#[derive(Debug, Clone, Deserialize)]
pub struct GuardConfig {
    /// Path of the renewal flow; always reachable and the redirect target
    #[serde(default = "default_renewal_path")]
    pub renewal_path: String,
}

impl GuardConfig {
    /// The renewal path as the router mounts it, without trailing slashes.
    pub fn normalized_renewal_path(&self) -> &str {
        self.renewal_path.trim_end_matches('/')
    }

    /// Validate guard configuration
    ///
    /// The renewal path and everything below it bypass the guard, so it must
    /// be a concrete page that neither equals nor encloses a fixed route.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.renewal_path.starts_with('/') {
            return Err(ValidationError::InvalidRenewalPath("must start with '/'"));
        }

        let path = self.normalized_renewal_path();
        if path.is_empty() {
            return Err(ValidationError::InvalidRenewalPath("must not be the root path"));
        }
        if path.contains("//") {
            return Err(ValidationError::InvalidRenewalPath("must not contain empty segments"));
        }
        if !path
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '/' | '-' | '_' | '.'))
        {
            return Err(ValidationError::InvalidRenewalPath(
                "only letters, digits, '-', '_', '.' and '/' are allowed",
            ));
        }

        for route in FIXED_ROUTES {
            let encloses = route
                .strip_prefix(path)
                .map(|rest| rest.is_empty() || rest.starts_with('/'))
                .unwrap_or(false);
            if encloses {
                return Err(ValidationError::RenewalPathConflict {
                    path: path.to_string(),
                    route,
                });
            }
        }

        Ok(())
    }
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            renewal_path: default_renewal_path(),
        }
    }
}

fn default_renewal_path() -> String {
    "/renew".to_string()
}
