//! Payment status state machine.

use crate::domain::foundation::{DomainError, ErrorCode, StateMachine};
use serde::{Deserialize, Serialize};

/// Status of a payment attempt.
///
/// A payment is created `Pending`. The gateway confirms it (`Paid`) or
/// rejects it (`Failed`); if it stays pending past its deadline the expiry
/// poller cancels it. All non-pending states are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Paid,
    /// Cancelled, including pending payments that expired.
    Cancelled,
    Failed,
}

impl PaymentStatus {
    /// Storage representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Cancelled => "cancelled",
            PaymentStatus::Failed => "failed",
        }
    }

    /// Parses a stored value. `expired` is accepted as an alias of cancelled.
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        match value.trim().to_lowercase().as_str() {
            "pending" => Ok(PaymentStatus::Pending),
            "paid" => Ok(PaymentStatus::Paid),
            "cancelled" | "canceled" | "expired" => Ok(PaymentStatus::Cancelled),
            "failed" => Ok(PaymentStatus::Failed),
            other => Err(DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid payment status value: {}", other),
            )),
        }
    }
}

impl StateMachine for PaymentStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use PaymentStatus::*;
        matches!(
            (self, target),
            (Pending, Paid) | (Pending, Cancelled) | (Pending, Failed)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use PaymentStatus::*;
        match self {
            Pending => vec![Paid, Cancelled, Failed],
            Paid | Cancelled | Failed => vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_can_be_cancelled() {
        assert_eq!(
            PaymentStatus::Pending.transition_to(PaymentStatus::Cancelled),
            Ok(PaymentStatus::Cancelled)
        );
    }

    #[test]
    fn settled_states_are_terminal() {
        assert!(PaymentStatus::Paid.is_terminal());
        assert!(PaymentStatus::Cancelled.is_terminal());
        assert!(PaymentStatus::Failed.is_terminal());
        assert!(!PaymentStatus::Pending.is_terminal());
    }

    #[test]
    fn paid_cannot_be_cancelled() {
        assert!(PaymentStatus::Paid
            .transition_to(PaymentStatus::Cancelled)
            .is_err());
    }

    #[test]
    fn expired_parses_as_cancelled() {
        assert_eq!(PaymentStatus::parse("expired").unwrap(), PaymentStatus::Cancelled);
        assert_eq!(PaymentStatus::parse("Canceled").unwrap(), PaymentStatus::Cancelled);
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert!(PaymentStatus::parse("refunded").is_err());
    }

    #[test]
    fn valid_transitions_are_consistent_with_can_transition_to() {
        for status in [
            PaymentStatus::Pending,
            PaymentStatus::Paid,
            PaymentStatus::Cancelled,
            PaymentStatus::Failed,
        ] {
            for target in status.valid_transitions() {
                assert!(status.can_transition_to(&target), "{:?} -> {:?}", status, target);
            }
        }
    }
}
