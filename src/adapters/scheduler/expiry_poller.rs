//! ExpiryPoller - Background service for the subscription lifecycle.
//!
//! Each run, in order:
//! 1. Cancels pending payments whose deadline has passed
//! 2. Sends due-soon reminders to active resellers whose subscription
//!    expires in exactly 7, 3 or 1 days
//!
//! ## Failure Semantics
//!
//! | Failure | Effect |
//! |---------|--------|
//! | Select fails | Run aborts, next tick retries |
//! | One row update fails | Logged and counted, remaining rows continue |
//!
//! Both steps are idempotent (conditional cancel, unique notification key),
//! so overlapping runs are not locked against.
//!
//! ## Graceful Shutdown
//!
//! The loop exits when the shutdown flag flips to `true`; a run in progress
//! completes first.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::watch;
use tokio::time::{self, MissedTickBehavior};

use crate::application::handlers::reminders::{
    EmitExpiryNotificationCommand, EmitExpiryNotificationHandler, EmitOutcome,
};
use crate::domain::foundation::{BusinessCalendar, DomainError, Timestamp};
use crate::domain::subscription::ReminderMilestone;
use crate::ports::{NotificationRepository, PaymentRepository, ResellerReader};

/// Configuration for the ExpiryPoller service.
#[derive(Debug, Clone)]
pub struct ExpiryPollerConfig {
    /// Time between two runs.
    pub interval: Duration,
}

impl Default for ExpiryPollerConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(300),
        }
    }
}

impl ExpiryPollerConfig {
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }
}

/// Counters for one poller run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PollReport {
    pub payments_cancelled: u32,
    /// Already settled by someone else between select and update.
    pub payments_skipped: u32,
    pub payments_failed: u32,
    pub notifications_created: u32,
    pub notifications_skipped: u32,
    pub notifications_failed: u32,
}

/// Background service that expires payments and emits reminders.
pub struct ExpiryPoller {
    payments: Arc<dyn PaymentRepository>,
    resellers: Arc<dyn ResellerReader>,
    emitter: EmitExpiryNotificationHandler,
    calendar: BusinessCalendar,
    config: ExpiryPollerConfig,
}

impl ExpiryPoller {
    pub fn new(
        payments: Arc<dyn PaymentRepository>,
        resellers: Arc<dyn ResellerReader>,
        notifications: Arc<dyn NotificationRepository>,
        calendar: BusinessCalendar,
    ) -> Self {
        Self::with_config(
            payments,
            resellers,
            notifications,
            calendar,
            ExpiryPollerConfig::default(),
        )
    }

    pub fn with_config(
        payments: Arc<dyn PaymentRepository>,
        resellers: Arc<dyn ResellerReader>,
        notifications: Arc<dyn NotificationRepository>,
        calendar: BusinessCalendar,
        config: ExpiryPollerConfig,
    ) -> Self {
        Self {
            payments,
            resellers,
            emitter: EmitExpiryNotificationHandler::new(notifications),
            calendar,
            config,
        }
    }

    /// Run the poll loop until the shutdown flag is set.
    ///
    /// A failed run is logged; the loop keeps ticking.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        let mut interval = time::interval(self.config.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        tracing::info!(
            interval_secs = self.config.interval.as_secs(),
            "Expiry poller started"
        );

        loop {
            tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }

                _ = interval.tick() => {
                    if let Err(e) = self.run_once(Timestamp::now()).await {
                        tracing::error!(error = %e, "Expiry poll run aborted");
                    }
                }
            }
        }

        tracing::info!("Expiry poller stopped");
    }

    /// Run exactly one pass as of `now`.
    ///
    /// # Errors
    ///
    /// Returns the storage error if selecting payments or resellers fails.
    /// Per-row failures are counted in the report instead.
    pub async fn run_once(&self, now: Timestamp) -> Result<PollReport, DomainError> {
        let mut report = PollReport::default();

        self.expire_payments(now, &mut report).await?;
        self.emit_reminders(now, &mut report).await?;

        tracing::info!(
            payments_cancelled = report.payments_cancelled,
            payments_skipped = report.payments_skipped,
            payments_failed = report.payments_failed,
            notifications_created = report.notifications_created,
            notifications_skipped = report.notifications_skipped,
            notifications_failed = report.notifications_failed,
            "Expiry poll run finished"
        );

        Ok(report)
    }

    async fn expire_payments(
        &self,
        now: Timestamp,
        report: &mut PollReport,
    ) -> Result<(), DomainError> {
        let overdue = self.payments.find_overdue_pending(now).await?;

        for payment in overdue {
            let mut expired = payment.clone();
            let note = match expired.expire(now) {
                Ok(note) => note,
                Err(e) => {
                    tracing::debug!(payment_id = %payment.id, error = %e, "Payment not expirable");
                    report.payments_skipped += 1;
                    continue;
                }
            };

            match self.payments.cancel_expired(&expired, &note).await {
                Ok(true) => {
                    tracing::info!(
                        payment_id = %payment.id,
                        reseller_id = %payment.reseller_id,
                        "Expired payment cancelled"
                    );
                    report.payments_cancelled += 1;
                }
                Ok(false) => report.payments_skipped += 1,
                Err(e) => {
                    tracing::warn!(payment_id = %payment.id, error = %e, "Failed to cancel expired payment");
                    report.payments_failed += 1;
                }
            }
        }

        Ok(())
    }

    async fn emit_reminders(
        &self,
        now: Timestamp,
        report: &mut PollReport,
    ) -> Result<(), DomainError> {
        let today = self.calendar.today(now);
        let targets = ReminderMilestone::target_expiry_dates(today);
        let candidates = self.resellers.find_active_expiring_on(&targets).await?;

        for reseller in candidates {
            let Some(days) = reseller
                .days_remaining(today)
                .filter(|d| ReminderMilestone::from_days(*d).is_some())
            else {
                report.notifications_skipped += 1;
                continue;
            };

            let cmd = EmitExpiryNotificationCommand {
                reseller_id: reseller.id,
                days_remaining: days,
                today,
            };
            match self.emitter.handle(cmd).await {
                Ok(EmitOutcome::Created(_)) => report.notifications_created += 1,
                Ok(EmitOutcome::AlreadyNotified) => report.notifications_skipped += 1,
                Err(e) => {
                    tracing::warn!(reseller_id = %reseller.id, error = %e, "Failed to emit expiry notification");
                    report.notifications_failed += 1;
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{
        InMemoryNotificationRepository, InMemoryPaymentRepository, InMemoryResellerReader,
    };
    use crate::domain::billing::{Payment, PaymentStatus};
    use crate::domain::foundation::{ErrorCode, PaymentId, PlanId, ResellerId};
    use crate::domain::subscription::{AccountStatus, ResellerSnapshot};
    use chrono::{DateTime, NaiveDate, Utc};

    struct Fixture {
        payments: Arc<InMemoryPaymentRepository>,
        resellers: Arc<InMemoryResellerReader>,
        notifications: Arc<InMemoryNotificationRepository>,
        poller: ExpiryPoller,
    }

    fn fixture() -> Fixture {
        let payments = Arc::new(InMemoryPaymentRepository::new());
        let resellers = Arc::new(InMemoryResellerReader::new());
        let notifications = Arc::new(InMemoryNotificationRepository::new());
        let poller = ExpiryPoller::with_config(
            payments.clone(),
            resellers.clone(),
            notifications.clone(),
            BusinessCalendar::utc(),
            ExpiryPollerConfig::default().with_interval(Duration::from_millis(10)),
        );
        Fixture {
            payments,
            resellers,
            notifications,
            poller,
        }
    }

    fn now() -> Timestamp {
        let dt: DateTime<Utc> = "2024-06-10T09:00:00Z".parse().unwrap();
        Timestamp::from_datetime(dt)
    }

    fn pending_payment(expires_at: Timestamp) -> Payment {
        Payment {
            id: PaymentId::new(),
            reseller_id: ResellerId::new(),
            plan_id: PlanId::new(),
            status: PaymentStatus::Pending,
            expires_at,
            notes: None,
            updated_at: expires_at.add_days(-1),
        }
    }

    fn reseller_expiring_in(days: i64) -> ResellerSnapshot {
        let today = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        ResellerSnapshot {
            id: ResellerId::new(),
            is_admin: false,
            is_active: true,
            subscription_expiry_date: Some(today + chrono::Duration::days(days)),
            account_status: AccountStatus::Active,
        }
    }

    #[tokio::test]
    async fn cancels_overdue_and_leaves_future_payments() {
        let f = fixture();
        let overdue = pending_payment(now().add_minutes(-5));
        let future = pending_payment(now().add_minutes(5));
        f.payments.insert(overdue.clone()).await;
        f.payments.insert(future.clone()).await;

        let report = f.poller.run_once(now()).await.unwrap();

        assert_eq!(report.payments_cancelled, 1);
        let stored = f.payments.get(&overdue.id).await.unwrap();
        assert_eq!(stored.status, PaymentStatus::Cancelled);
        assert!(stored.notes.unwrap().contains("expired at"));
        assert_eq!(
            f.payments.get(&future.id).await.unwrap().status,
            PaymentStatus::Pending
        );
    }

    #[tokio::test]
    async fn one_failing_update_does_not_stop_the_rest() {
        let f = fixture();
        let broken = pending_payment(now().add_minutes(-30));
        let fine = pending_payment(now().add_minutes(-10));
        f.payments.insert(broken.clone()).await;
        f.payments.insert(fine.clone()).await;
        f.payments.fail_updates_for(broken.id).await;

        let report = f.poller.run_once(now()).await.unwrap();

        assert_eq!(report.payments_failed, 1);
        assert_eq!(report.payments_cancelled, 1);
        assert_eq!(
            f.payments.get(&fine.id).await.unwrap().status,
            PaymentStatus::Cancelled
        );
        assert_eq!(
            f.payments.get(&broken.id).await.unwrap().status,
            PaymentStatus::Pending
        );
    }

    #[tokio::test]
    async fn reminders_only_on_milestone_days() {
        let f = fixture();
        for days in [1, 2, 3, 6, 7, 8] {
            f.resellers.upsert(reseller_expiring_in(days)).await;
        }

        let report = f.poller.run_once(now()).await.unwrap();

        assert_eq!(report.notifications_created, 3);
        let mut sent: Vec<_> = f
            .notifications
            .all()
            .await
            .into_iter()
            .filter_map(|n| n.days_remaining)
            .collect();
        sent.sort_unstable();
        assert_eq!(sent, vec![1, 3, 7]);
    }

    #[tokio::test]
    async fn inactive_resellers_get_no_reminder() {
        let f = fixture();
        let mut inactive = reseller_expiring_in(7);
        inactive.is_active = false;
        f.resellers.upsert(inactive).await;

        let report = f.poller.run_once(now()).await.unwrap();

        assert_eq!(report.notifications_created, 0);
        assert_eq!(f.notifications.count().await, 0);
    }

    #[tokio::test]
    async fn second_run_same_day_changes_nothing() {
        let f = fixture();
        f.payments.insert(pending_payment(now().add_minutes(-1))).await;
        f.resellers.upsert(reseller_expiring_in(3)).await;

        let first = f.poller.run_once(now()).await.unwrap();
        let second = f.poller.run_once(now().add_minutes(5)).await.unwrap();

        assert_eq!(first.payments_cancelled, 1);
        assert_eq!(first.notifications_created, 1);
        assert_eq!(second.payments_cancelled, 0);
        assert_eq!(second.notifications_created, 0);
        assert_eq!(second.notifications_skipped, 1);
        assert_eq!(f.notifications.count().await, 1);
    }

    #[tokio::test]
    async fn payment_select_failure_aborts_before_reminders() {
        let f = fixture();
        f.resellers.upsert(reseller_expiring_in(7)).await;
        f.payments.set_unavailable(true);

        let err = f.poller.run_once(now()).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert_eq!(f.notifications.count().await, 0);
    }

    #[tokio::test]
    async fn run_stops_on_shutdown_signal() {
        let f = fixture();
        f.payments.insert(pending_payment(Timestamp::now().add_minutes(-1))).await;
        let payments = f.payments.clone();
        let poller = f.poller;

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let handle = tokio::spawn(async move { poller.run(shutdown_rx).await });

        tokio::time::sleep(Duration::from_millis(50)).await;
        shutdown_tx.send(true).unwrap();

        handle.await.unwrap();
        let cancelled = payments
            .find_overdue_pending(Timestamp::now())
            .await
            .unwrap();
        assert!(cancelled.is_empty());
    }

    #[test]
    fn config_defaults_to_five_minutes() {
        assert_eq!(ExpiryPollerConfig::default().interval, Duration::from_secs(300));
    }
}
