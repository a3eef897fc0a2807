//! HTTP handlers for subscription endpoints.
//!
//! These handlers connect Axum routes to application layer query handlers.

use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Json, Query, State};
use axum::http::request::Parts;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::adapters::scheduler::ExpiryPoller;
use crate::application::handlers::notifications::{
    ListNotificationsHandler, ListNotificationsQuery,
};
use crate::application::handlers::subscription::{
    CheckAccessHandler, GetSubscriptionHandler, GetSubscriptionQuery,
};
use crate::domain::foundation::{BusinessCalendar, DomainError, ResellerId, Timestamp};
use crate::domain::subscription::{AccessGuard, SubscriptionError};
use crate::ports::{NotificationRepository, ResellerReader};

use super::dto::{
    ErrorResponse, ListNotificationsParams, NotificationListResponse, NotificationView,
    RenewalStatusResponse, SubscriptionResponse, SubscriptionView,
};

/// Header carrying the caller's reseller id, set by the panel's auth proxy.
pub const RESELLER_ID_HEADER: &str = "X-Reseller-Id";

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared state for subscription routes and the access guard.
#[derive(Clone)]
pub struct SubscriptionAppState {
    pub reseller_reader: Arc<dyn ResellerReader>,
    pub notification_repository: Arc<dyn NotificationRepository>,
    pub poller: Arc<ExpiryPoller>,
    pub calendar: BusinessCalendar,
    pub guard: AccessGuard,
}

impl SubscriptionAppState {
    pub fn get_subscription_handler(&self) -> GetSubscriptionHandler {
        GetSubscriptionHandler::new(self.reseller_reader.clone())
    }

    pub fn check_access_handler(&self) -> CheckAccessHandler {
        CheckAccessHandler::new(self.reseller_reader.clone())
    }

    pub fn list_notifications_handler(&self) -> ListNotificationsHandler {
        ListNotificationsHandler::new(self.notification_repository.clone())
    }

    /// Today's date in the business timezone.
    pub fn today(&self) -> chrono::NaiveDate {
        self.calendar.today(Timestamp::now())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Reseller Context
// ════════════════════════════════════════════════════════════════════════════════

/// The reseller making the request.
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedReseller {
    pub reseller_id: ResellerId,
}

/// Rejection for a missing or malformed reseller header.
pub struct AuthenticationRequired;

impl IntoResponse for AuthenticationRequired {
    fn into_response(self) -> Response {
        let error = ErrorResponse::new("AUTHENTICATION_REQUIRED", "Authentication is required");
        (StatusCode::UNAUTHORIZED, Json(error)).into_response()
    }
}

/// Reads the reseller id header, if present and well formed.
pub fn reseller_id_from_headers(headers: &HeaderMap) -> Option<ResellerId> {
    headers
        .get(RESELLER_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| ResellerId::parse(s).ok())
}

#[async_trait]
impl<S> axum::extract::FromRequestParts<S> for AuthenticatedReseller
where
    S: Send + Sync,
{
    type Rejection = AuthenticationRequired;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let reseller_id = reseller_id_from_headers(&parts.headers).ok_or(AuthenticationRequired)?;
        Ok(AuthenticatedReseller { reseller_id })
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Query Handlers (GET endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/subscription - Current reseller's subscription state
pub async fn get_subscription(
    State(state): State<SubscriptionAppState>,
    reseller: AuthenticatedReseller,
) -> Result<impl IntoResponse, SubscriptionApiError> {
    let handler = state.get_subscription_handler();
    let query = GetSubscriptionQuery {
        reseller_id: reseller.reseller_id,
        today: state.today(),
    };

    let info = handler.handle(query).await?;

    Ok(Json(SubscriptionResponse {
        subscription: SubscriptionView::from(info),
    }))
}

/// GET {renewal_path} - Renewal landing data; reachable while blocked
pub async fn get_renewal_status(
    State(state): State<SubscriptionAppState>,
    reseller: AuthenticatedReseller,
) -> Result<impl IntoResponse, SubscriptionApiError> {
    let handler = state.get_subscription_handler();
    let query = GetSubscriptionQuery {
        reseller_id: reseller.reseller_id,
        today: state.today(),
    };

    let info = handler.handle(query).await?;

    Ok(Json(RenewalStatusResponse {
        renewal_required: !info.access.is_allowed(),
        subscription: SubscriptionView::from(info),
    }))
}

/// GET /api/notifications - Most recent notifications for the reseller
pub async fn list_notifications(
    State(state): State<SubscriptionAppState>,
    reseller: AuthenticatedReseller,
    params: Result<Query<ListNotificationsParams>, QueryRejection>,
) -> Result<impl IntoResponse, SubscriptionApiError> {
    let Query(params) =
        params.map_err(|rejection| SubscriptionError::validation("query", rejection.body_text()))?;
    let handler = state.list_notifications_handler();
    let query = ListNotificationsQuery {
        reseller_id: reseller.reseller_id,
        limit: params.limit,
    };

    let notifications = handler.handle(query).await?;

    Ok(Json(NotificationListResponse {
        notifications: notifications
            .into_iter()
            .map(NotificationView::from)
            .collect(),
    }))
}

// ════════════════════════════════════════════════════════════════════════════════
// Command Handlers (POST endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/admin/poller/run - Run one expiry poll pass now (admin only)
pub async fn run_poller(
    State(state): State<SubscriptionAppState>,
    reseller: AuthenticatedReseller,
) -> Result<impl IntoResponse, SubscriptionApiError> {
    let is_admin = state
        .reseller_reader
        .get_snapshot(&reseller.reseller_id)
        .await?
        .map(|s| s.is_admin)
        .unwrap_or(false);
    if !is_admin {
        return Err(SubscriptionError::forbidden("Administrator access is required").into());
    }

    tracing::info!(reseller_id = %reseller.reseller_id, "Manual expiry poll requested");
    let report = state.poller.run_once(Timestamp::now()).await?;

    Ok(Json(report))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts subscription errors to HTTP responses.
#[derive(Debug)]
pub struct SubscriptionApiError(SubscriptionError);

impl From<SubscriptionError> for SubscriptionApiError {
    fn from(err: SubscriptionError) -> Self {
        Self(err)
    }
}

impl From<DomainError> for SubscriptionApiError {
    fn from(err: DomainError) -> Self {
        Self(SubscriptionError::from(err))
    }
}

impl IntoResponse for SubscriptionApiError {
    fn into_response(self) -> Response {
        let (status, error_code) = match &self.0 {
            SubscriptionError::ResellerNotFound(_) => {
                (StatusCode::NOT_FOUND, "RESELLER_NOT_FOUND")
            }
            SubscriptionError::Forbidden(_) => (StatusCode::FORBIDDEN, "FORBIDDEN"),
            SubscriptionError::ValidationFailed { .. } => {
                (StatusCode::BAD_REQUEST, "VALIDATION_FAILED")
            }
            SubscriptionError::Infrastructure(detail) => {
                tracing::error!(error = %detail, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        };

        let body = ErrorResponse::new(error_code, self.0.message());
        (status, Json(body)).into_response()
    }
}
