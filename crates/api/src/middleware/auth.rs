//! Bearer-token authentication extractor for Axum handlers.

use actify_core::error::CoreError;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;

use crate::error::AppError;
use crate::state::AppState;

/// Message for every authentication failure. Deliberately identical for a
/// missing header, a malformed header, and a rejected token.
pub const UNAUTHORIZED_MESSAGE: &str = "Unauthorized Access";

/// The verified caller, extracted from a Bearer token in the `Authorization`
/// header.
///
/// Use this as an extractor parameter in any handler that requires
/// authentication:
///
/// ```ignore
/// async fn my_handler(auth: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(email = %auth.email, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The verified email of the caller.
    pub email: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Missing or malformed credentials are rejected without calling the
        // identity authority.
        let token = bearer_token(&parts.headers).ok_or_else(unauthorized)?;

        let principal = state.verifier.verify(token).await.map_err(|e| {
            tracing::debug!(error = %e, "Identity verification failed");
            unauthorized()
        })?;

        Ok(AuthUser {
            email: principal.email,
        })
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header.
///
/// The scheme is matched case-insensitively. Returns `None` when the header
/// is absent, not valid UTF-8, uses another scheme, or has an empty token.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    let token = token.trim();

    if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() {
        Some(token)
    } else {
        None
    }
}

fn unauthorized() -> AppError {
    AppError::Core(CoreError::Unauthorized(UNAUTHORIZED_MESSAGE.into()))
}
