//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, the business calendar and error types
//! that form the vocabulary of the reseller billing domain.

mod calendar;
mod errors;
mod ids;
mod state_machine;
mod timestamp;

pub use calendar::{days_until, BusinessCalendar};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{NotificationId, PaymentId, PlanId, ResellerId};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
