//! Subscription health classification shown to resellers.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::days_until;

use super::ReminderMilestone;

/// Derived classification of a reseller's subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionHealth {
    Active,
    ExpiringSoon,
    Expired,
    NoSubscription,
}

impl SubscriptionHealth {
    /// Classifies an expiry date relative to `today`.
    ///
    /// "Expiring soon" starts at the earliest reminder milestone, so the
    /// health badge and the first reminder appear on the same day.
    pub fn classify(expiry: Option<NaiveDate>, today: NaiveDate) -> Self {
        let Some(expiry) = expiry else {
            return SubscriptionHealth::NoSubscription;
        };

        let days = days_until(expiry, today);
        if days < 0 {
            SubscriptionHealth::Expired
        } else if days <= ReminderMilestone::earliest().days() {
            SubscriptionHealth::ExpiringSoon
        } else {
            SubscriptionHealth::Active
        }
    }
}
