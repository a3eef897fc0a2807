//! In-memory payment repository.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::billing::{append_note, Payment, PaymentStatus};
use crate::domain::foundation::{DomainError, ErrorCode, PaymentId, Timestamp};
use crate::ports::PaymentRepository;

/// Payments held in a map, with per-row failure injection.
#[derive(Default)]
pub struct InMemoryPaymentRepository {
    payments: RwLock<HashMap<PaymentId, Payment>>,
    failing_updates: RwLock<HashSet<PaymentId>>,
    unavailable: AtomicBool,
}

impl InMemoryPaymentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, payment: Payment) {
        self.payments.write().await.insert(payment.id, payment);
    }

    pub async fn get(&self, id: &PaymentId) -> Option<Payment> {
        self.payments.read().await.get(id).cloned()
    }

    /// Makes updates of this payment fail.
    pub async fn fail_updates_for(&self, id: PaymentId) {
        self.failing_updates.write().await.insert(id);
    }

    /// Makes the overdue lookup fail, simulating a lost connection.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }
}

#[async_trait]
impl PaymentRepository for InMemoryPaymentRepository {
    async fn find_overdue_pending(&self, now: Timestamp) -> Result<Vec<Payment>, DomainError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DomainError::new(
                ErrorCode::DatabaseError,
                "payment store unavailable",
            ));
        }
        let payments = self.payments.read().await;
        let mut overdue: Vec<_> = payments
            .values()
            .filter(|p| p.is_overdue(now))
            .cloned()
            .collect();
        overdue.sort_by_key(|p| (p.expires_at, p.id));
        Ok(overdue)
    }

    async fn cancel_expired(&self, payment: &Payment, note: &str) -> Result<bool, DomainError> {
        if self.failing_updates.read().await.contains(&payment.id) {
            return Err(DomainError::new(
                ErrorCode::DatabaseError,
                format!("update of payment {} failed", payment.id),
            ));
        }

        let mut payments = self.payments.write().await;
        let Some(stored) = payments.get_mut(&payment.id) else {
            return Ok(false);
        };
        if stored.status != PaymentStatus::Pending {
            return Ok(false);
        }

        stored.status = PaymentStatus::Cancelled;
        stored.notes = Some(append_note(stored.notes.as_deref(), note));
        stored.updated_at = payment.updated_at;
        Ok(true)
    }
}
