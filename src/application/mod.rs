//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Following CQRS, it separates command handlers (write) from query handlers (read).

pub mod handlers;

pub use handlers::notifications::{ListNotificationsHandler, ListNotificationsQuery};
pub use handlers::reminders::{
    EmitExpiryNotificationCommand, EmitExpiryNotificationHandler, EmitOutcome,
};
pub use handlers::subscription::{
    CheckAccessHandler, CheckAccessQuery, GetSubscriptionHandler, GetSubscriptionQuery,
    SubscriptionInfo,
};
