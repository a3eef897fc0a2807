//! Reseller subscription snapshot.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{days_until, ResellerId};

use super::AccountStatus;

/// The fields of a reseller that decide subscription access.
///
/// Access state is never stored; it is derived from this snapshot on every
/// read by [`evaluate_access`](super::evaluate_access).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResellerSnapshot {
    pub id: ResellerId,
    pub is_admin: bool,
    pub is_active: bool,
    pub subscription_expiry_date: Option<NaiveDate>,
    pub account_status: AccountStatus,
}

impl ResellerSnapshot {
    /// Days from `today` until the subscription expires, if it has an expiry.
    pub fn days_remaining(&self, today: NaiveDate) -> Option<i64> {
        self.subscription_expiry_date
            .map(|expiry| days_until(expiry, today))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(expiry: Option<NaiveDate>) -> ResellerSnapshot {
        ResellerSnapshot {
            id: ResellerId::new(),
            is_admin: false,
            is_active: true,
            subscription_expiry_date: expiry,
            account_status: AccountStatus::Active,
        }
    }

    #[test]
    fn days_remaining_is_none_without_expiry() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        assert_eq!(snapshot(None).days_remaining(today), None);
    }

    #[test]
    fn days_remaining_counts_calendar_days() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let expiry = NaiveDate::from_ymd_opt(2024, 6, 4).unwrap();
        assert_eq!(snapshot(Some(expiry)).days_remaining(today), Some(3));
    }
}
