//! reseller-billing - Binary entry point
//!
//! Loads configuration, connects to PostgreSQL, starts the expiry poller and
//! serves the HTTP API until Ctrl-C or SIGTERM.

use std::sync::Arc;

use tokio::sync::watch;
use tracing_subscriber::EnvFilter;

use reseller_billing::adapters::http::{self, SubscriptionAppState};
use reseller_billing::adapters::postgres::{
    self, PostgresNotificationRepository, PostgresPaymentRepository, PostgresResellerReader,
};
use reseller_billing::adapters::scheduler::{ExpiryPoller, ExpiryPollerConfig};
use reseller_billing::config::AppConfig;
use reseller_billing::domain::subscription::AccessGuard;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate()?;

    let pool = postgres::connect(&config.database).await.map_err(|e| {
        tracing::error!("Database connection failed: {e}");
        e
    })?;
    if config.database.run_migrations {
        postgres::run_migrations(&pool).await?;
        tracing::info!("Database migrations applied");
    }

    let resellers = Arc::new(PostgresResellerReader::new(pool.clone()));
    let payments = Arc::new(PostgresPaymentRepository::new(pool.clone()));
    let notifications = Arc::new(PostgresNotificationRepository::new(pool.clone()));
    let calendar = config.poller.calendar()?;

    let poller = Arc::new(ExpiryPoller::with_config(
        payments,
        resellers.clone(),
        notifications.clone(),
        calendar,
        ExpiryPollerConfig::default().with_interval(config.poller.interval()),
    ));

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let poller_task = if config.poller.enabled {
        let poller = poller.clone();
        Some(tokio::spawn(async move { poller.run(shutdown_rx).await }))
    } else {
        tracing::info!("Expiry poller disabled");
        None
    };

    let state = SubscriptionAppState {
        reseller_reader: resellers,
        notification_repository: notifications,
        poller,
        calendar,
        guard: AccessGuard::new(config.guard.renewal_path.clone()),
    };
    let app = http::router(state, &config.server);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, environment = ?config.server.environment, "reseller-billing listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    let _ = shutdown_tx.send(true);
    if let Some(task) = poller_task {
        if let Err(e) = task.await {
            tracing::error!("Expiry poller task failed: {e}");
        }
    }

    pool.close().await;
    tracing::info!("Shutdown complete");
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    if config.is_production() {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
