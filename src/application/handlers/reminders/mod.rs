//! Reminder handlers.

mod emit_expiry_notification;

pub use emit_expiry_notification::{
    EmitExpiryNotificationCommand, EmitExpiryNotificationHandler, EmitOutcome,
};
