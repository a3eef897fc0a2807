//! In-memory notification repository.

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ResellerId};
use crate::domain::notification::{Notification, NotificationKind};
use crate::ports::{NotificationRepository, SaveResult};

/// Notifications held in insertion order.
#[derive(Default)]
pub struct InMemoryNotificationRepository {
    notifications: RwLock<Vec<Notification>>,
}

impl InMemoryNotificationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// All stored notifications (test helper).
    pub async fn all(&self) -> Vec<Notification> {
        self.notifications.read().await.clone()
    }

    pub async fn count(&self) -> usize {
        self.notifications.read().await.len()
    }
}

fn same_key(n: &Notification, reseller_id: &ResellerId, kind: NotificationKind, date: NaiveDate) -> bool {
    &n.reseller_id == reseller_id && n.kind == kind && n.notification_date == date
}

#[async_trait]
impl NotificationRepository for InMemoryNotificationRepository {
    async fn exists_for_day(
        &self,
        reseller_id: &ResellerId,
        kind: NotificationKind,
        date: NaiveDate,
    ) -> Result<bool, DomainError> {
        Ok(self
            .notifications
            .read()
            .await
            .iter()
            .any(|n| same_key(n, reseller_id, kind, date)))
    }

    async fn insert(&self, notification: &Notification) -> Result<SaveResult, DomainError> {
        let mut notifications = self.notifications.write().await;
        if notifications.iter().any(|n| {
            same_key(
                n,
                &notification.reseller_id,
                notification.kind,
                notification.notification_date,
            )
        }) {
            return Ok(SaveResult::AlreadyExists);
        }
        notifications.push(notification.clone());
        Ok(SaveResult::Inserted)
    }

    async fn list_for_reseller(
        &self,
        reseller_id: &ResellerId,
        limit: u32,
    ) -> Result<Vec<Notification>, DomainError> {
        let notifications = self.notifications.read().await;
        Ok(notifications
            .iter()
            .rev()
            .filter(|n| &n.reseller_id == reseller_id)
            .take(limit as usize)
            .cloned()
            .collect())
    }
}
