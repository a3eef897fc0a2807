//! Subscription-specific error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | ResellerNotFound | 404 |
//! | Forbidden | 403 |
//! | ValidationFailed | 400 |
//! | Infrastructure | 500 |

use crate::domain::foundation::{DomainError, ErrorCode, ResellerId};

/// Errors raised by subscription and reminder handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubscriptionError {
    /// No reseller exists with this id.
    ResellerNotFound(ResellerId),

    /// The caller may not perform this operation.
    Forbidden(String),

    /// Validation failed.
    ValidationFailed { field: String, message: String },

    /// Storage or other infrastructure failure.
    Infrastructure(String),
}

impl SubscriptionError {
    pub fn reseller_not_found(id: ResellerId) -> Self {
        SubscriptionError::ResellerNotFound(id)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        SubscriptionError::Forbidden(message.into())
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        SubscriptionError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        SubscriptionError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            SubscriptionError::ResellerNotFound(_) => ErrorCode::ResellerNotFound,
            SubscriptionError::Forbidden(_) => ErrorCode::Forbidden,
            SubscriptionError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            SubscriptionError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns a user-facing message.
    pub fn message(&self) -> String {
        match self {
            SubscriptionError::ResellerNotFound(id) => format!("Reseller not found: {}", id),
            SubscriptionError::Forbidden(message) => message.clone(),
            SubscriptionError::ValidationFailed { field, message } => {
                format!("Validation failed for {}: {}", field, message)
            }
            SubscriptionError::Infrastructure(_) => "An internal error occurred".to_string(),
        }
    }
}

impl std::fmt::Display for SubscriptionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubscriptionError::Infrastructure(detail) => {
                write!(f, "[{}] {}", self.code(), detail)
            }
            _ => write!(f, "[{}] {}", self.code(), self.message()),
        }
    }
}

impl std::error::Error for SubscriptionError {}

impl From<DomainError> for SubscriptionError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed => SubscriptionError::ValidationFailed {
                field: err.details.get("field").cloned().unwrap_or_default(),
                message: err.message,
            },
            ErrorCode::Forbidden => SubscriptionError::Forbidden(err.message),
            _ => SubscriptionError::Infrastructure(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_map_per_variant() {
        let id = ResellerId::new();
        assert_eq!(
            SubscriptionError::reseller_not_found(id).code(),
            ErrorCode::ResellerNotFound
        );
        assert_eq!(SubscriptionError::forbidden("no").code(), ErrorCode::Forbidden);
        assert_eq!(
            SubscriptionError::infrastructure("db down").code(),
            ErrorCode::DatabaseError
        );
    }

    #[test]
    fn infrastructure_message_hides_details() {
        let err = SubscriptionError::infrastructure("password=hunter2");
        assert!(!err.message().contains("hunter2"));
    }

    #[test]
    fn domain_validation_error_keeps_field() {
        let err: SubscriptionError = DomainError::validation("days_remaining", "must be positive").into();
        assert_eq!(
            err,
            SubscriptionError::ValidationFailed {
                field: "days_remaining".to_string(),
                message: "must be positive".to_string()
            }
        );
    }

    #[test]
    fn domain_forbidden_error_stays_forbidden() {
        let err: SubscriptionError =
            DomainError::new(ErrorCode::Forbidden, "admins only").into();
        assert_eq!(err, SubscriptionError::Forbidden("admins only".to_string()));
    }

    #[test]
    fn domain_database_error_becomes_infrastructure() {
        let err: SubscriptionError = DomainError::database("select", "timeout").into();
        assert!(matches!(err, SubscriptionError::Infrastructure(_)));
    }
}
