//! Handler for the internal commit endpoint.

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::{Deserialize, Serialize};
use sitesmith_core::error::CoreError;

use crate::commit::{self, Owner};
use crate::error::{AppError, AppResult};
use crate::middleware::InternalAuth;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerInput {
    pub user_id: String,
    #[serde(default)]
    pub tenant_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitRequest {
    pub owner: OwnerInput,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitResponse {
    pub project_id: String,
    pub config_id: String,
    pub status: &'static str,
}

/// POST /api/v1/drafts/{draft_id}/commit
///
/// `201 MIGRATED` on first write, `200 ALREADY_COMMITTED` on idempotent
/// replay, both with the original identifiers.
pub async fn commit(
    _auth: InternalAuth,
    State(state): State<AppState>,
    Path(draft_id): Path<String>,
    headers: HeaderMap,
    Json(input): Json<CommitRequest>,
) -> AppResult<(StatusCode, Json<CommitResponse>)> {
    if input.owner.user_id.trim().is_empty() {
        return Err(AppError::Core(CoreError::InvalidInput(
            "owner.userId must not be empty".into(),
        )));
    }

    // The draft id is the effective idempotency key; the header is
    // accepted for traceability only.
    if let Some(key) = headers.get("idempotency-key").and_then(|v| v.to_str().ok()) {
        tracing::debug!(draft_id = %draft_id, idempotency_key = key, "Commit carries idempotency key");
    }

    let owner = Owner {
        user_id: input.owner.user_id,
        tenant_id: input.owner.tenant_id,
    };
    let outcome = commit::commit_draft(&state, &draft_id, owner).await?;

    let (status_code, status) = if outcome.replayed {
        (StatusCode::OK, "ALREADY_COMMITTED")
    } else {
        (StatusCode::CREATED, "MIGRATED")
    };

    Ok((
        status_code,
        Json(CommitResponse {
            project_id: outcome.project_id,
            config_id: outcome.config_id,
            status,
        }),
    ))
}
