//! Notification query handlers.

mod list_notifications;

pub use list_notifications::{
    ListNotificationsHandler, ListNotificationsQuery, DEFAULT_LIMIT, MAX_LIMIT,
};
