//! Axum router configuration for subscription endpoints.

use axum::middleware;
use axum::routing::{get, post};
use axum::Router;

use super::handlers::{
    get_renewal_status, get_subscription, list_notifications, run_poller, SubscriptionAppState,
};
use crate::adapters::http::middleware::subscription_guard;
use crate::adapters::http::{NOTIFICATIONS_PATH, POLLER_RUN_PATH, SUBSCRIPTION_PATH};

/// Routes reachable regardless of subscription state.
///
/// - `GET /api/subscription` - Current reseller's subscription state
/// - `POST /api/admin/poller/run` - Run one poll pass (admin only)
pub fn account_routes() -> Router<SubscriptionAppState> {
    Router::new()
        .route(SUBSCRIPTION_PATH, get(get_subscription))
        .route(POLLER_RUN_PATH, post(run_poller))
}

/// Panel routes behind the subscription guard.
///
/// - `GET /api/notifications` - Reseller notifications
/// - `GET {renewal_path}` - Renewal landing (exempt from the guard)
pub fn panel_routes(state: &SubscriptionAppState) -> Router<SubscriptionAppState> {
    Router::new()
        .route(NOTIFICATIONS_PATH, get(list_notifications))
        .route(state.guard.renewal_path(), get(get_renewal_status))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            subscription_guard,
        ))
}

/// Complete subscription module router with state applied.
pub fn subscription_router(state: SubscriptionAppState) -> Router {
    Router::new()
        .merge(account_routes())
        .merge(panel_routes(&state))
        .with_state(state)
}
