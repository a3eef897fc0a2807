//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresResellerReader` - Reseller snapshots and expiring candidates
//! - `PostgresPaymentRepository` - Overdue lookup and conditional cancellation
//! - `PostgresNotificationRepository` - Day-scoped notification storage

mod notification_repository;
mod payment_repository;
mod reseller_reader;

pub use notification_repository::PostgresNotificationRepository;
pub use payment_repository::PostgresPaymentRepository;
pub use reseller_reader::PostgresResellerReader;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::DatabaseConfig;

/// Opens a connection pool sized and timed per `config`.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .min_connections(config.min_connections)
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout())
        .idle_timeout(config.idle_timeout())
        .connect(&config.url)
        .await
}

/// Applies the bundled migrations in `migrations/`.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
