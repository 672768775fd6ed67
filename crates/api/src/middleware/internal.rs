//! Shared-secret extractor for internal endpoints.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use sitesmith_core::error::CoreError;

use crate::error::AppError;
use crate::state::AppState;

/// Name of the internal auth header.
pub const INTERNAL_TOKEN_HEADER: &str = "x-internal-token";

/// Proof that the request carried the configured internal token.
///
/// Use as an extractor parameter on any handler that only trusted internal
/// callers (the registration service) may reach:
///
/// ```ignore
/// async fn commit(_auth: InternalAuth, ...) -> AppResult<...> { ... }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct InternalAuth;

impl FromRequestParts<AppState> for InternalAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(INTERNAL_TOKEN_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing X-Internal-Token header".into(),
                ))
            })?;

        if token != state.config.internal_commit_token {
            return Err(AppError::Core(CoreError::Unauthorized(
                "Invalid internal token".into(),
            )));
        }

        Ok(InternalAuth)
    }
}
