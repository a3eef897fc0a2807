//! Strongly-typed identifier value objects.
//!
//! Every identifier wraps a UUID. The `uuid_id!` macro generates the shared
//! constructor, accessor, `Display` and `FromStr` impls for each type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::ValidationError;

macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident, $field:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random identifier.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates an identifier from an existing UUID.
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Parses an identifier from user input, naming the field on failure.
            pub fn parse(s: &str) -> Result<Self, ValidationError> {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Err(ValidationError::empty_field($field));
                }
                Uuid::parse_str(trimmed)
                    .map(Self)
                    .map_err(|e| ValidationError::invalid_format($field, e.to_string()))
            }

            /// Returns the inner UUID.
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }
    };
}

uuid_id!(
    /// Unique identifier for a reseller (platform tenant).
    ResellerId,
    "reseller_id"
);

uuid_id!(
    /// Unique identifier for a payment attempt.
    PaymentId,
    "payment_id"
);

uuid_id!(
    /// Unique identifier for a subscription plan.
    PlanId,
    "plan_id"
);

uuid_id!(
    /// Unique identifier for a reseller notification.
    NotificationId,
    "notification_id"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reseller_id_generates_unique_values() {
        let id1 = ResellerId::new();
        let id2 = ResellerId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn reseller_id_parses_from_string() {
        let uuid = Uuid::new_v4();
        let id: ResellerId = uuid.to_string().parse().unwrap();
        assert_eq!(id.as_uuid(), &uuid);
    }

    #[test]
    fn parse_trims_surrounding_whitespace() {
        let uuid = Uuid::new_v4();
        let id = PaymentId::parse(&format!("  {}  ", uuid)).unwrap();
        assert_eq!(id.as_uuid(), &uuid);
    }

    #[test]
    fn parse_rejects_empty_string() {
        match ResellerId::parse("") {
            Err(ValidationError::EmptyField { field }) => assert_eq!(field, "reseller_id"),
            other => panic!("expected EmptyField, got {:?}", other),
        }
    }

    #[test]
    fn parse_rejects_malformed_uuid() {
        match NotificationId::parse("not-a-uuid") {
            Err(ValidationError::InvalidFormat { field, .. }) => {
                assert_eq!(field, "notification_id")
            }
            other => panic!("expected InvalidFormat, got {:?}", other),
        }
    }

    #[test]
    fn ids_serialize_as_bare_uuid_strings() {
        let uuid = Uuid::new_v4();
        let id = PlanId::from_uuid(uuid);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", uuid));
    }
}
