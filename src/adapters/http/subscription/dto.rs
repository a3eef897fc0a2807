//! HTTP DTOs for subscription, notification and admin endpoints.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::application::handlers::subscription::SubscriptionInfo;
use crate::domain::notification::{Notification, NotificationPriority};
use crate::domain::subscription::{AccessDecision, SubscriptionHealth};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Query string of `GET /api/notifications`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListNotificationsParams {
    #[serde(default)]
    pub limit: Option<u32>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Response wrapping a reseller's subscription view.
#[derive(Debug, Clone, Serialize)]
pub struct SubscriptionResponse {
    pub subscription: SubscriptionView,
}

/// Subscription state as shown on the dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct SubscriptionView {
    pub reseller_id: String,
    pub is_admin: bool,
    pub is_active: bool,
    pub account_status: String,
    pub subscription_health: SubscriptionHealth,
    /// ISO date, null when no subscription is on record.
    pub subscription_expiry_date: Option<NaiveDate>,
    pub days_remaining: Option<i64>,
    pub access: AccessView,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessView {
    pub allowed: bool,
    pub reason: Option<String>,
}

impl From<&AccessDecision> for AccessView {
    fn from(decision: &AccessDecision) -> Self {
        Self {
            allowed: decision.is_allowed(),
            reason: decision.reason().map(|r| r.to_string()),
        }
    }
}

impl From<SubscriptionInfo> for SubscriptionView {
    fn from(info: SubscriptionInfo) -> Self {
        Self {
            reseller_id: info.reseller_id.to_string(),
            is_admin: info.is_admin,
            is_active: info.is_active,
            account_status: info.account_status.as_str().to_string(),
            subscription_health: info.subscription_health,
            subscription_expiry_date: info.subscription_expiry_date,
            days_remaining: info.days_remaining,
            access: AccessView::from(&info.access),
        }
    }
}

/// Response of the renewal landing route.
#[derive(Debug, Clone, Serialize)]
pub struct RenewalStatusResponse {
    pub renewal_required: bool,
    pub subscription: SubscriptionView,
}

#[derive(Debug, Clone, Serialize)]
pub struct NotificationView {
    pub id: String,
    pub kind: String,
    pub title: String,
    pub message: String,
    pub priority: NotificationPriority,
    pub is_read: bool,
    pub days_remaining: Option<i32>,
    pub notification_date: NaiveDate,
    /// RFC 3339.
    pub created_at: String,
}

impl From<Notification> for NotificationView {
    fn from(n: Notification) -> Self {
        Self {
            id: n.id.to_string(),
            kind: n.kind.as_str().to_string(),
            title: n.title,
            message: n.message,
            priority: n.priority,
            is_read: n.is_read,
            days_remaining: n.days_remaining,
            notification_date: n.notification_date,
            created_at: n.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NotificationListResponse {
    pub notifications: Vec<NotificationView>,
}

/// Error response body.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details),
        }
    }
}
