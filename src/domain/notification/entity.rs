//! Notification entity.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, ErrorCode, NotificationId, ResellerId, Timestamp};

/// What a notification is about. Part of the one-per-day dedup key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    SubscriptionExpiring,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::SubscriptionExpiring => "subscription_expiring",
        }
    }

    pub fn parse(value: &str) -> Result<Self, DomainError> {
        match value {
            "subscription_expiring" => Ok(NotificationKind::SubscriptionExpiring),
            other => Err(DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid notification kind: {}", other),
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationPriority {
    Low,
    Normal,
    High,
}

impl NotificationPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationPriority::Low => "low",
            NotificationPriority::Normal => "normal",
            NotificationPriority::High => "high",
        }
    }

    pub fn parse(value: &str) -> Result<Self, DomainError> {
        match value {
            "low" => Ok(NotificationPriority::Low),
            "normal" => Ok(NotificationPriority::Normal),
            "high" => Ok(NotificationPriority::High),
            other => Err(DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid notification priority: {}", other),
            )),
        }
    }
}

/// A notification addressed to one reseller.
///
/// # Invariants
///
/// - At most one notification per `(reseller_id, kind, notification_date)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub reseller_id: ResellerId,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub priority: NotificationPriority,
    pub is_read: bool,
    /// Days left on the subscription when the reminder was issued.
    pub days_remaining: Option<i32>,
    /// Business calendar day the notification belongs to.
    pub notification_date: NaiveDate,
    pub created_at: Timestamp,
}

impl Notification {
    /// Builds an unread, high-priority subscription-expiring reminder.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `days_remaining` is not positive.
    pub fn subscription_expiring(
        reseller_id: ResellerId,
        days_remaining: i64,
        notification_date: NaiveDate,
        created_at: Timestamp,
    ) -> Result<Self, DomainError> {
        if days_remaining < 1 {
            return Err(DomainError::validation(
                "days_remaining",
                format!("must be positive, got {}", days_remaining),
            ));
        }
        let days = i32::try_from(days_remaining).map_err(|_| {
            DomainError::validation("days_remaining", "value too large")
        })?;

        Ok(Self {
            id: NotificationId::new(),
            reseller_id,
            kind: NotificationKind::SubscriptionExpiring,
            title: "Subscription expiring".to_string(),
            message: expiring_message(days),
            priority: NotificationPriority::High,
            is_read: false,
            days_remaining: Some(days),
            notification_date,
            created_at,
        })
    }
}

fn expiring_message(days: i32) -> String {
    let unit = if days == 1 { "day" } else { "days" };
    format!(
        "Your subscription expires in {} {}. Renew now to keep your panel access.",
        days, unit
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
    }

    #[test]
    fn expiring_notification_is_high_priority_and_unread() {
        let n = Notification::subscription_expiring(ResellerId::new(), 7, today(), Timestamp::now())
            .unwrap();

        assert_eq!(n.kind, NotificationKind::SubscriptionExpiring);
        assert_eq!(n.priority, NotificationPriority::High);
        assert!(!n.is_read);
        assert_eq!(n.days_remaining, Some(7));
        assert_eq!(n.notification_date, today());
    }

    #[test]
    fn message_interpolates_days_remaining() {
        let n = Notification::subscription_expiring(ResellerId::new(), 7, today(), Timestamp::now())
            .unwrap();
        assert!(n.message.contains("7 days"));
    }

    #[test]
    fn message_uses_singular_for_one_day() {
        let n = Notification::subscription_expiring(ResellerId::new(), 1, today(), Timestamp::now())
            .unwrap();
        assert!(n.message.contains("1 day."));
    }

    #[test]
    fn each_notification_gets_a_fresh_id() {
        let reseller = ResellerId::new();
        let a = Notification::subscription_expiring(reseller, 3, today(), Timestamp::now()).unwrap();
        let b = Notification::subscription_expiring(reseller, 3, today(), Timestamp::now()).unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn non_positive_days_are_rejected() {
        for days in [0, -2] {
            let err = Notification::subscription_expiring(ResellerId::new(), days, today(), Timestamp::now())
                .unwrap_err();
            assert_eq!(err.code, ErrorCode::ValidationFailed);
        }
    }

    #[test]
    fn kind_and_priority_round_trip_through_storage_strings() {
        assert_eq!(
            NotificationKind::parse(NotificationKind::SubscriptionExpiring.as_str()).unwrap(),
            NotificationKind::SubscriptionExpiring
        );
        assert_eq!(NotificationPriority::parse("high").unwrap(), NotificationPriority::High);
        assert!(NotificationPriority::parse("urgent").is_err());
    }
}
