//! PostgreSQL implementation of ResellerReader.
//!
//! Reads only the columns the access decision depends on; the rest of the
//! reseller row is owned by the platform backend.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{DomainError, ResellerId};
use crate::domain::subscription::{AccountStatus, ResellerSnapshot};
use crate::ports::ResellerReader;

pub struct PostgresResellerReader {
    pool: PgPool,
}

impl PostgresResellerReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ResellerRow {
    id: Uuid,
    is_admin: bool,
    is_active: bool,
    subscription_expiry_date: Option<NaiveDate>,
    account_status: String,
}

impl From<ResellerRow> for ResellerSnapshot {
    fn from(row: ResellerRow) -> Self {
        ResellerSnapshot {
            id: ResellerId::from_uuid(row.id),
            is_admin: row.is_admin,
            is_active: row.is_active,
            subscription_expiry_date: row.subscription_expiry_date,
            account_status: AccountStatus::parse(&row.account_status),
        }
    }
}

#[async_trait]
impl ResellerReader for PostgresResellerReader {
    async fn get_snapshot(&self, id: &ResellerId) -> Result<Option<ResellerSnapshot>, DomainError> {
        let row: Option<ResellerRow> = sqlx::query_as(
            r#"
            SELECT id, is_admin, is_active, subscription_expiry_date, account_status
            FROM resellers
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to load reseller", e))?;

        Ok(row.map(ResellerSnapshot::from))
    }

    async fn find_active_expiring_on(
        &self,
        expiry_dates: &[NaiveDate],
    ) -> Result<Vec<ResellerSnapshot>, DomainError> {
        if expiry_dates.is_empty() {
            return Ok(Vec::new());
        }

        let rows: Vec<ResellerRow> = sqlx::query_as(
            r#"
            SELECT id, is_admin, is_active, subscription_expiry_date, account_status
            FROM resellers
            WHERE is_active = TRUE
              AND subscription_expiry_date IS NOT NULL
              AND subscription_expiry_date = ANY($1)
            ORDER BY subscription_expiry_date, id
            "#,
        )
        .bind(expiry_dates)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to find expiring resellers", e))?;

        Ok(rows.into_iter().map(ResellerSnapshot::from).collect())
    }
}
