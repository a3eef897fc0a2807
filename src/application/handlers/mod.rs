//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod notifications;
pub mod reminders;
pub mod subscription;
