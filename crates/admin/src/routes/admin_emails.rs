//! Admin email list management handlers (admin only).

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::access::{ListSource, ResolvedAdminList};
use crate::error::AppError;
use crate::middleware::RequireAdmin;
use crate::services::{AdminEmailRegistry, RegistryError};
use crate::state::AppState;

/// Admin list view returned by every handler here.
#[derive(Debug, Serialize)]
pub struct AdminEmailsResponse {
    /// Effective admin emails, normalized.
    pub emails: Vec<String>,
    /// `stored` or `defaults`.
    pub source: &'static str,
}

impl From<ResolvedAdminList> for AdminEmailsResponse {
    fn from(resolved: ResolvedAdminList) -> Self {
        Self {
            emails: resolved.emails.into(),
            source: match resolved.source {
                ListSource::Stored => "stored",
                ListSource::Defaults(_) => "defaults",
            },
        }
    }
}

/// Request body for adding an admin email.
#[derive(Debug, Deserialize)]
pub struct AddAdminEmailRequest {
    pub email: String,
}

/// `GET /api/admin-emails`
#[instrument(skip_all)]
pub async fn list(
    RequireAdmin(_identity): RequireAdmin,
    State(state): State<AppState>,
) -> Result<Json<AdminEmailsResponse>, AppError> {
    let resolved = state
        .run_blocking(|access| AdminEmailRegistry::new(access).list())
        .await?;
    Ok(Json(resolved.into()))
}

/// `POST /api/admin-emails`
///
/// Responds 201 when the email was added and 200 when it was already listed.
#[instrument(skip_all)]
pub async fn add(
    RequireAdmin(_identity): RequireAdmin,
    State(state): State<AppState>,
    Json(body): Json<AddAdminEmailRequest>,
) -> Result<(StatusCode, Json<AdminEmailsResponse>), AppError> {
    let (added, resolved) = state
        .run_blocking(move |access| {
            let registry = AdminEmailRegistry::new(access);
            let added = registry.add(&body.email)?;
            Ok::<_, RegistryError>((added, registry.list()))
        })
        .await??;
    let status = if added {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(resolved.into())))
}

/// `DELETE /api/admin-emails/{email}`
///
/// Responds 404 when the email was not listed.
#[instrument(skip_all)]
pub async fn remove(
    RequireAdmin(_identity): RequireAdmin,
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<(StatusCode, Json<AdminEmailsResponse>), AppError> {
    let (removed, resolved) = state
        .run_blocking(move |access| {
            let registry = AdminEmailRegistry::new(access);
            let removed = registry.remove(&email)?;
            Ok::<_, RegistryError>((removed, registry.list()))
        })
        .await??;
    let status = if removed {
        StatusCode::OK
    } else {
        StatusCode::NOT_FOUND
    };
    Ok((status, Json(resolved.into())))
}

/// `POST /api/admin-emails/reset`
#[instrument(skip_all)]
pub async fn reset(
    RequireAdmin(_identity): RequireAdmin,
    State(state): State<AppState>,
) -> Result<Json<AdminEmailsResponse>, AppError> {
    let resolved = state
        .run_blocking(|access| {
            let registry = AdminEmailRegistry::new(access);
            registry.reset()?;
            Ok::<_, RegistryError>(registry.list())
        })
        .await??;
    Ok(Json(resolved.into()))
}
