//! ListNotificationsHandler - Query handler for a reseller's notifications.

use std::sync::Arc;

use crate::domain::foundation::ResellerId;
use crate::domain::notification::Notification;
use crate::domain::subscription::SubscriptionError;
use crate::ports::NotificationRepository;

/// Default page size when the caller gives none.
pub const DEFAULT_LIMIT: u32 = 50;
/// Upper bound on the page size.
pub const MAX_LIMIT: u32 = 200;

#[derive(Debug, Clone)]
pub struct ListNotificationsQuery {
    pub reseller_id: ResellerId,
    pub limit: Option<u32>,
}

pub struct ListNotificationsHandler {
    notifications: Arc<dyn NotificationRepository>,
}

impl ListNotificationsHandler {
    pub fn new(notifications: Arc<dyn NotificationRepository>) -> Self {
        Self { notifications }
    }

    pub async fn handle(
        &self,
        query: ListNotificationsQuery,
    ) -> Result<Vec<Notification>, SubscriptionError> {
        let limit = match query.limit {
            None => DEFAULT_LIMIT,
            Some(0) => {
                return Err(SubscriptionError::validation("limit", "must be at least 1"));
            }
            Some(n) => n.min(MAX_LIMIT),
        };

        Ok(self
            .notifications
            .list_for_reseller(&query.reseller_id, limit)
            .await?)
    }
}
