//! Notification domain module.
//!
//! In-app notifications shown to resellers. The only kind produced by this
//! service is the subscription-expiring reminder.

mod entity;

pub use entity::{Notification, NotificationKind, NotificationPriority};
