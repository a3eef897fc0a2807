//! PostgreSQL implementation of NotificationRepository.
//!
//! Day-scoped dedup relies on the `notifications_reseller_kind_day_key`
//! unique constraint; inserts use `ON CONFLICT DO NOTHING` on that key.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{DomainError, NotificationId, ResellerId, Timestamp};
use crate::domain::notification::{Notification, NotificationKind, NotificationPriority};
use crate::ports::{NotificationRepository, SaveResult};

pub struct PostgresNotificationRepository {
    pool: PgPool,
}

impl PostgresNotificationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct NotificationRow {
    id: Uuid,
    reseller_id: Uuid,
    kind: String,
    title: String,
    message: String,
    priority: String,
    is_read: bool,
    days_remaining: Option<i32>,
    notification_date: NaiveDate,
    created_at: DateTime<Utc>,
}

impl TryFrom<NotificationRow> for Notification {
    type Error = DomainError;

    fn try_from(row: NotificationRow) -> Result<Self, Self::Error> {
        Ok(Notification {
            id: NotificationId::from_uuid(row.id),
            reseller_id: ResellerId::from_uuid(row.reseller_id),
            kind: NotificationKind::parse(&row.kind)?,
            title: row.title,
            message: row.message,
            priority: NotificationPriority::parse(&row.priority)?,
            is_read: row.is_read,
            days_remaining: row.days_remaining,
            notification_date: row.notification_date,
            created_at: Timestamp::from_datetime(row.created_at),
        })
    }
}

#[async_trait]
impl NotificationRepository for PostgresNotificationRepository {
    async fn exists_for_day(
        &self,
        reseller_id: &ResellerId,
        kind: NotificationKind,
        date: NaiveDate,
    ) -> Result<bool, DomainError> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM notifications
                WHERE reseller_id = $1 AND kind = $2 AND notification_date = $3
            )
            "#,
        )
        .bind(reseller_id.as_uuid())
        .bind(kind.as_str())
        .bind(date)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to check notifications", e))?;

        Ok(exists)
    }

    async fn insert(&self, notification: &Notification) -> Result<SaveResult, DomainError> {
        let result = sqlx::query(
            r#"
            INSERT INTO notifications (
                id, reseller_id, kind, title, message, priority, is_read,
                days_remaining, notification_date, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (reseller_id, kind, notification_date) DO NOTHING
            "#,
        )
        .bind(notification.id.as_uuid())
        .bind(notification.reseller_id.as_uuid())
        .bind(notification.kind.as_str())
        .bind(&notification.title)
        .bind(&notification.message)
        .bind(notification.priority.as_str())
        .bind(notification.is_read)
        .bind(notification.days_remaining)
        .bind(notification.notification_date)
        .bind(notification.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to insert notification", e))?;

        if result.rows_affected() == 0 {
            Ok(SaveResult::AlreadyExists)
        } else {
            Ok(SaveResult::Inserted)
        }
    }

    async fn list_for_reseller(
        &self,
        reseller_id: &ResellerId,
        limit: u32,
    ) -> Result<Vec<Notification>, DomainError> {
        let rows: Vec<NotificationRow> = sqlx::query_as(
            r#"
            SELECT id, reseller_id, kind, title, message, priority, is_read,
                   days_remaining, notification_date, created_at
            FROM notifications
            WHERE reseller_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2
            "#,
        )
        .bind(reseller_id.as_uuid())
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to list notifications", e))?;

        rows.into_iter().map(Notification::try_from).collect()
    }
}
