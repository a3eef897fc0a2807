//! HTTP adapters - REST API implementations.

pub mod health;
pub mod middleware;
pub mod subscription;

pub use subscription::SubscriptionAppState;

use axum::http::HeaderValue;
use axum::Router;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

pub const HEALTH_PATH: &str = "/health";
pub const SUBSCRIPTION_PATH: &str = "/api/subscription";
pub const NOTIFICATIONS_PATH: &str = "/api/notifications";
pub const POLLER_RUN_PATH: &str = "/api/admin/poller/run";

/// Routes mounted at fixed paths. The configured renewal path must not equal
/// or enclose any of them.
pub const FIXED_ROUTES: [&str; 4] = [
    HEALTH_PATH,
    SUBSCRIPTION_PATH,
    NOTIFICATIONS_PATH,
    POLLER_RUN_PATH,
];

/// Builds the complete application router.
///
/// Layers, outermost first: trace, CORS, request timeout.
pub fn router(state: SubscriptionAppState, server: &ServerConfig) -> Router {
    Router::new()
        .merge(health::health_router())
        .merge(subscription::subscription_router(state))
        .layer(TimeoutLayer::new(server.request_timeout()))
        .layer(cors_layer(server))
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();

    if origins.is_empty() {
        CorsLayer::new()
    } else {
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods([axum::http::Method::GET, axum::http::Method::POST])
            .allow_headers(tower_http::cors::Any)
    }
}
