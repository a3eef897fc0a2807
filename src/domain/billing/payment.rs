//! Payment aggregate.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    DomainError, ErrorCode, PaymentId, PlanId, ResellerId, StateMachine, Timestamp,
};

use super::PaymentStatus;

/// A reseller's payment for a plan.
///
/// # Invariants
///
/// - Only a pending payment can change status
/// - `notes` is append-only: each automatic transition adds one line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    pub id: PaymentId,
    pub reseller_id: ResellerId,
    pub plan_id: PlanId,
    pub status: PaymentStatus,
    /// Deadline after which a pending payment counts as expired.
    pub expires_at: Timestamp,
    /// Audit trail.
    pub notes: Option<String>,
    pub updated_at: Timestamp,
}

impl Payment {
    /// Returns true if the payment is still pending after its deadline.
    pub fn is_overdue(&self, now: Timestamp) -> bool {
        self.status == PaymentStatus::Pending && self.expires_at.is_before(&now)
    }

    /// The audit line recorded when this payment expires.
    pub fn expiry_note(&self) -> String {
        format!(
            "Cancelled automatically: payment expired at {}",
            self.expires_at.to_rfc3339()
        )
    }

    /// Cancels an overdue pending payment and records the audit note.
    ///
    /// Returns the note that was appended.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` if the payment is not pending
    /// - `ValidationFailed` if the deadline has not passed yet
    pub fn expire(&mut self, now: Timestamp) -> Result<String, DomainError> {
        let next = self.status.transition_to(PaymentStatus::Cancelled).map_err(|e| {
            DomainError::new(ErrorCode::InvalidStateTransition, e.to_string())
                .with_detail("payment_id", self.id.to_string())
        })?;

        if !self.is_overdue(now) {
            return Err(DomainError::validation(
                "expires_at",
                format!("Payment {} has not expired yet", self.id),
            ));
        }

        let note = self.expiry_note();
        self.status = next;
        self.notes = Some(append_note(self.notes.as_deref(), &note));
        self.updated_at = now;
        Ok(note)
    }
}

/// Appends `note` as a new line of an existing audit trail.
pub fn append_note(existing: Option<&str>, note: &str) -> String {
    match existing {
        Some(prev) if !prev.trim().is_empty() => format!("{}\n{}", prev.trim_end(), note),
        _ => note.to_string(),
    }
}
