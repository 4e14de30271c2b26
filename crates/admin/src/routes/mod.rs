//! HTTP route handlers for admin.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                    - Liveness check
//! GET    /health/ready              - Store readability check
//!
//! # Access (any caller)
//! GET    /api/access                - Evaluate the caller's identity
//!
//! # Admin list (admin only)
//! GET    /api/admin-emails          - Effective admin list
//! POST   /api/admin-emails          - Add an email
//! POST   /api/admin-emails/reset    - Drop the stored list, back to defaults
//! DELETE /api/admin-emails/{email}  - Remove an email
//! ```

pub mod access;
pub mod admin_emails;
pub mod health;

use axum::{
    Router,
    routing::{delete, get, post},
};
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use crate::state::AppState;

/// All routes, without state or layers.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .route("/api/access", get(access::check))
        .route(
            "/api/admin-emails",
            get(admin_emails::list).post(admin_emails::add),
        )
        .route("/api/admin-emails/reset", post(admin_emails::reset))
        .route("/api/admin-emails/{email}", delete(admin_emails::remove))
}

/// The full application router with request tracing.
pub fn app(state: AppState) -> Router {
    routes()
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
}
