//! Authentication extractors for admin.
//!
//! The identity comes from the upstream auth gateway, which authenticates
//! the user and forwards the result in trusted request headers:
//!
//! - `x-auth-email` - the user's email
//! - `x-auth-role` - the user's role
//!
//! This service must only be reachable through that gateway.

use axum::{extract::FromRequestParts, http::request::Parts};
use ufsbd_admin_core::UserIdentity;

use crate::error::AppError;
use crate::state::AppState;

/// Header carrying the authenticated user's email.
pub const EMAIL_HEADER: &str = "x-auth-email";

/// Header carrying the authenticated user's role.
pub const ROLE_HEADER: &str = "x-auth-role";

/// Read the caller identity from the gateway headers.
///
/// Missing, blank, or non-UTF-8 header values are treated as absent.
#[must_use]
pub fn identity_from_parts(parts: &Parts) -> UserIdentity {
    let header = |name: &str| {
        parts
            .headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned)
    };

    UserIdentity::new(header(EMAIL_HEADER), header(ROLE_HEADER))
}

/// Extractor that yields the caller identity, possibly anonymous.
///
/// Never rejects.
pub struct CurrentIdentity(pub UserIdentity);

impl<S> FromRequestParts<S> for CurrentIdentity
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(identity_from_parts(parts)))
    }
}

/// Extractor that requires admin access.
///
/// Admits the caller if their email is in the admin list OR their role is
/// privileged. Rejects with 401 when no identity was forwarded and 403 when
/// the identity is not an admin.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAdmin(identity): RequireAdmin,
/// ) -> impl IntoResponse {
///     format!("Hello, {:?}!", identity.email)
/// }
/// ```
pub struct RequireAdmin(pub UserIdentity);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let identity = identity_from_parts(parts);

        if identity.is_anonymous() {
            return Err(AppError::Unauthorized("no identity forwarded".to_string()));
        }

        let (identity, admitted) = state
            .run_blocking(move |access| {
                let admitted = access.is_admin(&identity);
                (identity, admitted)
            })
            .await?;

        if !admitted {
            tracing::info!(
                email = identity.email().unwrap_or_default(),
                role = identity.role().unwrap_or_default(),
                path = %parts.uri.path(),
                "Admin access denied"
            );
            return Err(AppError::Forbidden("admin access required".to_string()));
        }

        Ok(Self(identity))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::Request;

    use super::*;

    fn parts(headers: &[(&str, &str)]) -> Parts {
        let mut builder = Request::builder().uri("/api/admin-emails");
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn test_identity_from_headers() {
        let parts = parts(&[(EMAIL_HEADER, "Admin@UFSBD34.fr"), (ROLE_HEADER, "doctor")]);
        let identity = identity_from_parts(&parts);
        assert_eq!(identity.email(), Some("Admin@UFSBD34.fr"));
        assert_eq!(identity.role(), Some("doctor"));
    }

    #[test]
    fn test_missing_and_blank_headers_are_absent() {
        let identity = identity_from_parts(&parts(&[]));
        assert!(identity.is_anonymous());

        let identity = identity_from_parts(&parts(&[(EMAIL_HEADER, " "), (ROLE_HEADER, "")]));
        assert!(identity.is_anonymous());
    }
}
