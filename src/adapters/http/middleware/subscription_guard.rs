//! Subscription guard middleware.
//!
//! Wraps protected routes. For each request:
//!
//! ```text
//! renewal path? ── yes ──> handler
//!      │ no
//! reseller header ── missing ──> 401
//!      │
//! snapshot ── fetch error ──> 503 (fail closed)
//!      │   ── unknown ──> 403
//! evaluate ── allowed ──> handler
//!          ── expired ──> 303 renewal path
//!          ── other ──> 403
//! ```
//!
//! # Example
//!
//! ```ignore
//! let protected = Router::new()
//!     .route("/api/notifications", get(list_notifications))
//!     .route_layer(middleware::from_fn_with_state(state.clone(), subscription_guard));
//! ```

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
    Json,
};

use crate::adapters::http::subscription::dto::ErrorResponse;
use crate::adapters::http::subscription::handlers::{
    reseller_id_from_headers, AuthenticationRequired, SubscriptionAppState,
};
use crate::application::handlers::subscription::CheckAccessQuery;
use crate::domain::subscription::{GuardOutcome, SubscriptionError};

/// Guard middleware; see the module docs for the decision table.
pub async fn subscription_guard(
    State(state): State<SubscriptionAppState>,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();
    if state.guard.is_exempt(&path) {
        return next.run(request).await;
    }

    let Some(reseller_id) = reseller_id_from_headers(request.headers()) else {
        return AuthenticationRequired.into_response();
    };

    let query = CheckAccessQuery {
        reseller_id,
        today: state.today(),
    };
    let decision = match state.check_access_handler().handle(query).await {
        Ok(decision) => decision,
        Err(SubscriptionError::ResellerNotFound(_)) => {
            tracing::debug!(reseller_id = %reseller_id, path = %path, "Unknown reseller blocked");
            return access_blocked("No subscription on record", None);
        }
        Err(e) => {
            tracing::error!(reseller_id = %reseller_id, error = %e, "Subscription check failed");
            let body = ErrorResponse::new(
                "SUBSCRIPTION_CHECK_FAILED",
                "Subscription status is temporarily unavailable",
            );
            return (StatusCode::SERVICE_UNAVAILABLE, Json(body)).into_response();
        }
    };

    match state.guard.decide(&path, &decision) {
        GuardOutcome::Proceed => next.run(request).await,
        GuardOutcome::RedirectToRenewal(target) => {
            tracing::debug!(reseller_id = %reseller_id, path = %path, "Redirecting to renewal");
            Redirect::to(&target).into_response()
        }
        GuardOutcome::Deny(reason) => {
            tracing::info!(reseller_id = %reseller_id, reason = %reason, "Access blocked");
            let details = serde_json::to_value(&reason).ok();
            access_blocked(reason.to_string(), details)
        }
    }
}

fn access_blocked(message: impl Into<String>, details: Option<serde_json::Value>) -> Response {
    let body = match details {
        Some(details) => ErrorResponse::with_details("ACCESS_BLOCKED", message, details),
        None => ErrorResponse::new("ACCESS_BLOCKED", message),
    };
    (StatusCode::FORBIDDEN, Json(body)).into_response()
}
