//! Health check handlers.

use axum::extract::State;
use axum::http::StatusCode;

use crate::access::{FallbackReason, ListSource};
use crate::error::AppError;
use crate::state::AppState;

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
pub async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Returns 503 Service Unavailable if the admin list store cannot be read.
/// Access checks keep working in that state (on the defaults), but edits
/// to the list would fail.
pub async fn readiness(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    let source = state
        .run_blocking(|access| access.resolve_admin_list().source)
        .await?;
    Ok(match source {
        ListSource::Defaults(FallbackReason::Unavailable(_)) => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::OK,
    })
}
