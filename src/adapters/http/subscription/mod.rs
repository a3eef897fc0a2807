//! Subscription HTTP adapter.

pub mod dto;
pub mod handlers;
mod routes;

pub use handlers::SubscriptionAppState;
pub use routes::{account_routes, panel_routes, subscription_router};
