//! PostgreSQL implementation of PaymentRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::billing::{Payment, PaymentStatus};
use crate::domain::foundation::{DomainError, PaymentId, PlanId, ResellerId, Timestamp};
use crate::ports::PaymentRepository;

pub struct PostgresPaymentRepository {
    pool: PgPool,
}

impl PostgresPaymentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct PaymentRow {
    id: Uuid,
    reseller_id: Uuid,
    plan_id: Uuid,
    status: String,
    expires_at: DateTime<Utc>,
    notes: Option<String>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<PaymentRow> for Payment {
    type Error = DomainError;

    fn try_from(row: PaymentRow) -> Result<Self, Self::Error> {
        Ok(Payment {
            id: PaymentId::from_uuid(row.id),
            reseller_id: ResellerId::from_uuid(row.reseller_id),
            plan_id: PlanId::from_uuid(row.plan_id),
            status: PaymentStatus::parse(&row.status)?,
            expires_at: Timestamp::from_datetime(row.expires_at),
            notes: row.notes,
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

#[async_trait]
impl PaymentRepository for PostgresPaymentRepository {
    async fn find_overdue_pending(&self, now: Timestamp) -> Result<Vec<Payment>, DomainError> {
        let rows: Vec<PaymentRow> = sqlx::query_as(
            r#"
            SELECT id, reseller_id, plan_id, status, expires_at, notes, updated_at
            FROM payments
            WHERE status = 'pending' AND expires_at < $1
            ORDER BY expires_at, id
            "#,
        )
        .bind(now.as_datetime())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to find overdue payments", e))?;

        rows.into_iter().map(Payment::try_from).collect()
    }

    async fn cancel_expired(&self, payment: &Payment, note: &str) -> Result<bool, DomainError> {
        // The status predicate makes a concurrent or repeated run a no-op.
        let result = sqlx::query(
            r#"
            UPDATE payments SET
                status = 'cancelled',
                notes = CASE
                    WHEN notes IS NULL OR btrim(notes) = '' THEN $2
                    ELSE rtrim(notes, E' \t\r\n') || E'\n' || $2
                END,
                updated_at = $3
            WHERE id = $1 AND status = 'pending'
            "#,
        )
        .bind(payment.id.as_uuid())
        .bind(note)
        .bind(payment.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::database("Failed to cancel payment", e)
                .with_detail("payment_id", payment.id.to_string())
        })?;

        Ok(result.rows_affected() == 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorCode;

    fn row(status: &str) -> PaymentRow {
        PaymentRow {
            id: Uuid::new_v4(),
            reseller_id: Uuid::new_v4(),
            plan_id: Uuid::new_v4(),
            status: status.to_string(),
            expires_at: Utc::now(),
            notes: None,
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn legacy_expired_status_reads_as_cancelled() {
        let payment = Payment::try_from(row("expired")).unwrap();
        assert_eq!(payment.status, PaymentStatus::Cancelled);
    }

    #[test]
    fn unknown_status_is_rejected() {
        let err = Payment::try_from(row("refunded-ish")).unwrap_err();
        assert_eq!(err.code, ErrorCode::DatabaseError);
    }
}
