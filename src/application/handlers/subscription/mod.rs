//! Subscription query handlers.

mod check_access;
mod get_subscription;

pub use check_access::{CheckAccessHandler, CheckAccessQuery};
pub use get_subscription::{GetSubscriptionHandler, GetSubscriptionQuery, SubscriptionInfo};
