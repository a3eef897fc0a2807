//! Notification repository port.
//!
//! Implementations must enforce uniqueness of
//! `(reseller_id, kind, notification_date)` in storage (a unique index with
//! `ON CONFLICT DO NOTHING`), not by matching message text.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::foundation::{DomainError, ResellerId};
use crate::domain::notification::{Notification, NotificationKind};

/// Result of attempting to save a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveResult {
    /// Row inserted.
    Inserted,
    /// A notification with the same dedup key already exists.
    AlreadyExists,
}

#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// True if a notification of `kind` exists for the reseller on `date`.
    async fn exists_for_day(
        &self,
        reseller_id: &ResellerId,
        kind: NotificationKind,
        date: NaiveDate,
    ) -> Result<bool, DomainError>;

    /// Inserts a notification unless its dedup key is already taken.
    async fn insert(&self, notification: &Notification) -> Result<SaveResult, DomainError>;

    /// Most recent notifications for a reseller, newest first.
    async fn list_for_reseller(
        &self,
        reseller_id: &ResellerId,
        limit: u32,
    ) -> Result<Vec<Notification>, DomainError>;
}
