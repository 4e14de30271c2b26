//! Access decision endpoint.
//!
//! Lets the front-end ask whether the current user may see admin views,
//! without being rejected when they may not.

use axum::Json;
use axum::extract::State;
use serde::Serialize;
use tracing::instrument;

use crate::access::has_admin_role;
use crate::error::AppError;
use crate::middleware::CurrentIdentity;
use crate::state::AppState;

/// Result of both access checks for the caller.
#[derive(Debug, Serialize)]
pub struct AccessDecision {
    /// Email is in the admin list.
    pub email_allowed: bool,
    /// Role is privileged.
    pub role_allowed: bool,
    /// Either check passed.
    pub is_admin: bool,
}

/// `GET /api/access` - evaluate the caller's identity.
#[instrument(skip_all)]
pub async fn check(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
) -> Result<Json<AccessDecision>, AppError> {
    let role_allowed = has_admin_role(identity.role());
    let email = identity.email().map(str::to_owned);
    let email_allowed = state
        .run_blocking(move |access| access.check_admin_access(email.as_deref()))
        .await?;

    Ok(Json(AccessDecision {
        email_allowed,
        role_allowed,
        is_admin: email_allowed || role_allowed,
    }))
}
