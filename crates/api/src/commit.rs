//! The commit coordinator: idempotent migration of a draft into a
//! permanent project plus configuration.
//!
//! State machine per attempt:
//!
//! ```text
//! acquire lock ─▶ idempotency check ─▶ { exists: return existing ids }
//!                                      { absent: load ─▶ generate ─▶
//!                                        persist(tx) ─▶ delete draft }
//! any error after acquisition ─▶ release lock, propagate
//! ```
//!
//! The lock only prevents wasted work; `uq_projects_draft_id` is the
//! correctness floor, so a lost lock at worst turns into a duplicate-key
//! replay inside the transaction.

use chrono::Utc;
use sitesmith_core::canonical;
use sitesmith_core::error::CoreError;
use sitesmith_core::generator;
use sitesmith_core::types;
use sitesmith_db::models::project::NewProject;
use sitesmith_db::models::project_config::NewProjectConfig;
use sitesmith_db::repositories::{CommitInsert, CommitRepo, ProjectConfigRepo, ProjectRepo};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// The externally issued owner a committed project belongs to.
#[derive(Debug, Clone)]
pub struct Owner {
    pub user_id: String,
    pub tenant_id: Option<String>,
}

/// Result of a commit attempt.
#[derive(Debug, Clone)]
pub struct CommitOutcome {
    pub project_id: String,
    pub config_id: String,
    /// `true` when this call observed an earlier commit instead of writing.
    pub replayed: bool,
}

/// Commit a draft for `owner`. Serialized per draft by the commit lock;
/// safe under lock loss via the unique constraint.
pub async fn commit_draft(
    state: &AppState,
    draft_id: &str,
    owner: Owner,
) -> AppResult<CommitOutcome> {
    let acquired = state
        .commit_lock
        .acquire(draft_id, state.config.commit_lock_ttl_secs)
        .await?;
    if !acquired {
        return Err(AppError::Core(CoreError::CommitInProgress(
            draft_id.to_string(),
        )));
    }

    let result = commit_locked(state, draft_id, owner).await;

    // Best-effort: the lock's TTL reclaims it if this fails.
    if let Err(e) = state.commit_lock.release(draft_id).await {
        tracing::warn!(draft_id, error = %e, "Commit lock release failed");
    }

    result
}

async fn commit_locked(
    state: &AppState,
    draft_id: &str,
    owner: Owner,
) -> AppResult<CommitOutcome> {
    // Idempotency check: a committed draft is terminal.
    if let Some(existing) = ProjectRepo::find_by_draft_id(&state.pool, draft_id).await? {
        tracing::info!(draft_id, project_id = %existing.project_id, "Commit replay");
        cleanup_draft(state, draft_id).await;
        return replay_outcome(state, existing.project_id).await;
    }

    // Load without sliding: committing is not user activity.
    let draft = state
        .drafts
        .find_by_id(draft_id, false)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::DraftNotFound(draft_id.to_string())))?;

    let now = Utc::now();
    if draft.is_expired(now) {
        return Err(AppError::Core(CoreError::DraftExpired(draft_id.to_string())));
    }

    let config = generator::generate(&draft, &state.templates, now)?;
    let config_hash = canonical::config_hash(&config)?;
    let config_json = serde_json::to_value(&config)
        .map_err(|e| AppError::Internal(format!("config serialization: {e}")))?;

    let project = NewProject {
        project_id: types::new_project_id(),
        owner_user_id: owner.user_id,
        owner_tenant_id: owner.tenant_id,
        draft_id: draft_id.to_string(),
        created_at: now,
    };
    let new_config = NewProjectConfig {
        config_id: config.config_id.clone(),
        schema_version: config.schema_version,
        config_version: config.config_version.clone(),
        template_id: config.generator.template_id.clone(),
        template_version: config.generator.template_version,
        config_json,
        config_hash,
        created_at: now,
    };

    match CommitRepo::insert_project_with_config(&state.pool, &project, &new_config).await? {
        CommitInsert::Inserted => {
            tracing::info!(
                draft_id,
                project_id = %project.project_id,
                config_id = %new_config.config_id,
                "Draft migrated to project"
            );
            cleanup_draft(state, draft_id).await;
            Ok(CommitOutcome {
                project_id: project.project_id,
                config_id: new_config.config_id,
                replayed: false,
            })
        }
        CommitInsert::DuplicateDraft => {
            // A writer raced past a lost lock; their rows win.
            let existing = ProjectRepo::find_by_draft_id(&state.pool, draft_id)
                .await?
                .ok_or_else(|| {
                    AppError::Internal(format!(
                        "draft {draft_id}: unique violation without a surviving project row"
                    ))
                })?;
            cleanup_draft(state, draft_id).await;
            replay_outcome(state, existing.project_id).await
        }
    }
}

/// Answer a replay with the originally committed identifiers.
async fn replay_outcome(state: &AppState, project_id: String) -> AppResult<CommitOutcome> {
    let config = ProjectConfigRepo::find_latest_by_project_id(&state.pool, &project_id)
        .await?
        .ok_or_else(|| {
            AppError::Internal(format!("project {project_id} has no configuration row"))
        })?;
    Ok(CommitOutcome {
        project_id,
        config_id: config.config_id,
        replayed: true,
    })
}

/// Remove the draft after a durable commit. Best-effort: the TTL reclaims
/// anything this misses, and replays re-attempt the delete.
async fn cleanup_draft(state: &AppState, draft_id: &str) {
    if let Err(e) = state.drafts.delete(draft_id).await {
        tracing::warn!(draft_id, error = %e, "Post-commit draft delete failed");
    }
}
