//! Payment repository port.
//!
//! # Design
//!
//! - **Conditional writes**: `cancel_expired` only touches rows that are still
//!   pending, so two overlapping poller runs cannot double-apply a transition
//! - **Row-level**: each update stands alone; there is no batch transaction

use async_trait::async_trait;

use crate::domain::billing::Payment;
use crate::domain::foundation::{DomainError, Timestamp};

/// Repository port for payment expiry.
#[async_trait]
pub trait PaymentRepository: Send + Sync {
    /// Pending payments whose `expires_at` is strictly before `now`.
    async fn find_overdue_pending(&self, now: Timestamp) -> Result<Vec<Payment>, DomainError>;

    /// Persists an expired payment: status cancelled plus the appended note.
    ///
    /// Returns `false` if the row was no longer pending (another run or the
    /// gateway settled it first).
    async fn cancel_expired(&self, payment: &Payment, note: &str) -> Result<bool, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn PaymentRepository) {}
    }
}
