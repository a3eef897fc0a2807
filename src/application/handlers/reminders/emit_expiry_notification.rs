//! EmitExpiryNotificationHandler - Command handler for due-soon reminders.
//!
//! Creates at most one subscription-expiring notification per reseller per
//! business day. Calling it again the same day is a no-op.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::foundation::{NotificationId, ResellerId, Timestamp};
use crate::domain::notification::{Notification, NotificationKind};
use crate::domain::subscription::SubscriptionError;
use crate::ports::{NotificationRepository, SaveResult};

/// Command to remind a reseller that the subscription is about to expire.
#[derive(Debug, Clone)]
pub struct EmitExpiryNotificationCommand {
    pub reseller_id: ResellerId,
    pub days_remaining: i64,
    /// Business day the reminder belongs to.
    pub today: NaiveDate,
}

/// Outcome of an emit attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmitOutcome {
    Created(NotificationId),
    AlreadyNotified,
}

/// Handler for emitting subscription-expiring notifications.
pub struct EmitExpiryNotificationHandler {
    notifications: Arc<dyn NotificationRepository>,
}

impl EmitExpiryNotificationHandler {
    pub fn new(notifications: Arc<dyn NotificationRepository>) -> Self {
        Self { notifications }
    }

    pub async fn handle(
        &self,
        cmd: EmitExpiryNotificationCommand,
    ) -> Result<EmitOutcome, SubscriptionError> {
        let already_sent = self
            .notifications
            .exists_for_day(
                &cmd.reseller_id,
                NotificationKind::SubscriptionExpiring,
                cmd.today,
            )
            .await?;
        if already_sent {
            tracing::debug!(
                reseller_id = %cmd.reseller_id,
                date = %cmd.today,
                "Expiry notification already sent today"
            );
            return Ok(EmitOutcome::AlreadyNotified);
        }

        let notification = Notification::subscription_expiring(
            cmd.reseller_id,
            cmd.days_remaining,
            cmd.today,
            Timestamp::now(),
        )?;

        // The existence check and the insert are separate statements; the
        // storage key settles the race when two runs overlap.
        match self.notifications.insert(&notification).await? {
            SaveResult::Inserted => {
                tracing::info!(
                    reseller_id = %cmd.reseller_id,
                    notification_id = %notification.id,
                    days_remaining = cmd.days_remaining,
                    "Expiry notification created"
                );
                Ok(EmitOutcome::Created(notification.id))
            }
            SaveResult::AlreadyExists => Ok(EmitOutcome::AlreadyNotified),
        }
    }
}
