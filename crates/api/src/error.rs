use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use sitesmith_core::error::CoreError;
use sitesmith_store::StoreError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors, [`StoreError`] for the ephemeral
/// store, and sqlx errors for the commit path. Implements [`IntoResponse`]
/// to produce the service's `{error, message}` wire shape.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `sitesmith_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// An ephemeral store error.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => classify_core_error(core),
            AppError::Store(store) => classify_store_error(store),
            AppError::Database(err) => classify_sqlx_error(err),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "INVALID_INPUT", msg.clone())
            }
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": code,
            "message": message,
        });

        (status, axum::Json(body)).into_response()
    }
}

fn classify_core_error(err: &CoreError) -> (StatusCode, &'static str, String) {
    match err {
        CoreError::InvalidInput(msg) => {
            (StatusCode::BAD_REQUEST, "INVALID_INPUT", msg.clone())
        }
        CoreError::Unauthorized(msg) => {
            (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
        }
        CoreError::DraftNotFound(id) => (
            StatusCode::NOT_FOUND,
            "DRAFT_NOT_FOUND",
            format!("Draft {id} not found"),
        ),
        CoreError::AssetNotFound(id) => (
            StatusCode::NOT_FOUND,
            "ASSET_NOT_FOUND",
            format!("Asset {id} not found"),
        ),
        CoreError::DraftExpired(id) => (
            StatusCode::GONE,
            "DRAFT_EXPIRED",
            format!("Draft {id} has expired"),
        ),
        CoreError::CommitInProgress(id) => (
            StatusCode::CONFLICT,
            "COMMIT_IN_PROGRESS",
            format!("A commit for draft {id} is already in progress"),
        ),
        CoreError::PreviewUnsafe(msg) => {
            tracing::error!(error = %msg, "Unsafe preview content");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "PREVIEW_UNSAFE",
                "Preview contains unsafe content".to_string(),
            )
        }
        CoreError::Internal(msg) => {
            tracing::error!(error = %msg, "Internal core error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL",
                "An internal error occurred".to_string(),
            )
        }
    }
}

fn classify_store_error(err: &StoreError) -> (StatusCode, &'static str, String) {
    match err {
        StoreError::NotFound(id) => (
            StatusCode::NOT_FOUND,
            "DRAFT_NOT_FOUND",
            format!("Draft {id} not found"),
        ),
        StoreError::AlreadyExists(id) | StoreError::Conflict(id) => (
            StatusCode::CONFLICT,
            "CONFLICT",
            format!("Concurrent modification of draft {id}"),
        ),
        StoreError::Serialization(msg) | StoreError::Backend(msg) => {
            tracing::error!(error = %msg, "Draft store error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL",
                "An internal error occurred".to_string(),
            )
        }
    }
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// Unique violations are handled upstream by the commit coordinator; one
/// reaching this point is a bug surfaced as a conflict rather than a 500.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "DRAFT_NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23505") => {
            tracing::warn!(constraint = ?db_err.constraint(), "Unexpected unique violation");
            (
                StatusCode::CONFLICT,
                "CONFLICT",
                "Duplicate value violates a unique constraint".to_string(),
            )
        }
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL",
                "An internal error occurred".to_string(),
            )
        }
    }
}
