//! Access guard routing decision.
//!
//! The guard turns an evaluated [`AccessDecision`] into what should happen to
//! a navigation. The HTTP middleware supplies the request path and the
//! decision.

use super::{AccessDecision, BlockReason};

/// What to do with a guarded request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome {
    /// Render the protected view.
    Proceed,
    /// Send the reseller to the renewal page.
    RedirectToRenewal(String),
    /// Blocked for a reason renewal cannot fix.
    Deny(BlockReason),
}

/// Routing policy for protected views.
#[derive(Debug, Clone)]
pub struct AccessGuard {
    renewal_path: String,
}

impl AccessGuard {
    /// Creates a guard redirecting to `renewal_path`.
    pub fn new(renewal_path: impl Into<String>) -> Self {
        let path = renewal_path.into();
        let trimmed = path.trim_end_matches('/');
        Self {
            renewal_path: if trimmed.is_empty() {
                "/".to_string()
            } else {
                trimmed.to_string()
            },
        }
    }

    /// The renewal page path.
    pub fn renewal_path(&self) -> &str {
        &self.renewal_path
    }

    /// True if `path` is the renewal page or nested under it.
    ///
    /// Those paths are always reachable, otherwise an expired reseller would
    /// loop between redirect and guard.
    pub fn is_exempt(&self, path: &str) -> bool {
        match path.strip_prefix(self.renewal_path.as_str()) {
            Some(rest) => rest.is_empty() || rest.starts_with('/') || rest.starts_with('?'),
            None => false,
        }
    }

    /// Decides the outcome for a request to `path`.
    pub fn decide(&self, path: &str, decision: &AccessDecision) -> GuardOutcome {
        if self.is_exempt(path) {
            return GuardOutcome::Proceed;
        }

        match decision {
            AccessDecision::Allowed => GuardOutcome::Proceed,
            AccessDecision::Blocked(reason) if reason.is_renewable() => {
                GuardOutcome::RedirectToRenewal(self.renewal_path.clone())
            }
            AccessDecision::Blocked(reason) => GuardOutcome::Deny(reason.clone()),
        }
    }
}

impl Default for AccessGuard {
    fn default() -> Self {
        Self::new("/renew")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::subscription::AccountStatus;

    fn expired() -> AccessDecision {
        AccessDecision::Blocked(BlockReason::SubscriptionExpired)
    }

    #[test]
    fn allowed_requests_proceed() {
        let guard = AccessGuard::default();
        assert_eq!(
            guard.decide("/api/notifications", &AccessDecision::Allowed),
            GuardOutcome::Proceed
        );
    }

    #[test]
    fn expired_requests_redirect_to_renewal() {
        let guard = AccessGuard::default();
        assert_eq!(
            guard.decide("/dashboard", &expired()),
            GuardOutcome::RedirectToRenewal("/renew".to_string())
        );
    }

    #[test]
    fn renewal_page_is_reachable_while_expired() {
        let guard = AccessGuard::default();
        assert_eq!(guard.decide("/renew", &expired()), GuardOutcome::Proceed);
        assert_eq!(guard.decide("/renew/checkout", &expired()), GuardOutcome::Proceed);
        assert_eq!(guard.decide("/renew?plan=3", &expired()), GuardOutcome::Proceed);
    }

    #[test]
    fn similar_prefixes_are_not_exempt() {
        let guard = AccessGuard::default();
        assert!(!guard.is_exempt("/renewals"));
        assert_eq!(
            guard.decide("/renewals", &expired()),
            GuardOutcome::RedirectToRenewal("/renew".to_string())
        );
    }

    #[test]
    fn non_renewable_reasons_are_denied() {
        let guard = AccessGuard::default();
        let suspended = AccessDecision::Blocked(BlockReason::AccountStatus {
            status: AccountStatus::Suspended,
        });

        assert_eq!(
            guard.decide("/dashboard", &suspended),
            GuardOutcome::Deny(BlockReason::AccountStatus {
                status: AccountStatus::Suspended
            })
        );
        assert_eq!(
            guard.decide("/dashboard", &AccessDecision::Blocked(BlockReason::AccountDisabled)),
            GuardOutcome::Deny(BlockReason::AccountDisabled)
        );
    }

    #[test]
    fn root_renewal_path_exempts_only_itself() {
        let guard = AccessGuard::new("/");
        assert!(guard.is_exempt("/"));
        assert!(!guard.is_exempt("/api/notifications"));
        assert_eq!(
            guard.decide("/api/notifications", &expired()),
            GuardOutcome::RedirectToRenewal("/".to_string())
        );
    }

    #[test]
    fn trailing_slash_in_configured_path_is_ignored() {
        let guard = AccessGuard::new("/billing/renew/");
        assert_eq!(guard.renewal_path(), "/billing/renew");
        assert!(guard.is_exempt("/billing/renew"));
    }
}
