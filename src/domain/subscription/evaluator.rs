//! Subscription access evaluation.
//!
//! A reseller's access is derived, never stored. The rules run in a fixed
//! order and the first match wins:
//!
//! 1. admins are always allowed
//! 2. disabled accounts are blocked
//! 3. a missing or past expiry date blocks
//! 4. account status outside `active`/`trial` blocks
//! 5. everything else is allowed
//!
//! The expiry date itself is the last day of access: a subscription expiring
//! today still grants access until the day rolls over.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{AccountStatus, ResellerSnapshot};

/// Outcome of evaluating a reseller's subscription.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDecision {
    Allowed,
    Blocked(BlockReason),
}

impl AccessDecision {
    /// Returns true if access is allowed.
    pub fn is_allowed(&self) -> bool {
        matches!(self, AccessDecision::Allowed)
    }

    /// The block reason, if blocked.
    pub fn reason(&self) -> Option<&BlockReason> {
        match self {
            AccessDecision::Allowed => None,
            AccessDecision::Blocked(reason) => Some(reason),
        }
    }
}

/// Why a reseller is blocked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BlockReason {
    /// `is_active` is false.
    AccountDisabled,

    /// No expiry date on record, or it is before today.
    SubscriptionExpired,

    /// Account status other than active or trial.
    AccountStatus { status: AccountStatus },
}

impl BlockReason {
    /// True for reasons the reseller fixes by renewing.
    pub fn is_renewable(&self) -> bool {
        matches!(self, BlockReason::SubscriptionExpired)
    }
}

impl fmt::Display for BlockReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockReason::AccountDisabled => write!(f, "account disabled"),
            BlockReason::SubscriptionExpired => write!(f, "subscription expired"),
            BlockReason::AccountStatus { status } => write!(f, "account status {}", status),
        }
    }
}

/// Evaluates a reseller snapshot against `today`.
pub fn evaluate_access(snapshot: &ResellerSnapshot, today: NaiveDate) -> AccessDecision {
    if snapshot.is_admin {
        return AccessDecision::Allowed;
    }

    if !snapshot.is_active {
        return AccessDecision::Blocked(BlockReason::AccountDisabled);
    }

    match snapshot.subscription_expiry_date {
        Some(expiry) if expiry >= today => {}
        _ => return AccessDecision::Blocked(BlockReason::SubscriptionExpired),
    }

    if !snapshot.account_status.permits_access() {
        return AccessDecision::Blocked(BlockReason::AccountStatus {
            status: snapshot.account_status.clone(),
        });
    }

    AccessDecision::Allowed
}
