//! Repository for the `projects` table.

use sqlx::PgPool;

use crate::models::project::Project;

const COLUMNS: &str =
    "project_id, owner_user_id, owner_tenant_id, draft_id, created_at, updated_at, status";

/// Read access to committed projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Find a project by its id.
    pub async fn find_by_id(
        pool: &PgPool,
        project_id: &str,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE project_id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(project_id)
            .fetch_optional(pool)
            .await
    }

    /// Find the project committed from a given draft, if any. This is the
    /// commit idempotency probe.
    pub async fn find_by_draft_id(
        pool: &PgPool,
        draft_id: &str,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE draft_id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(draft_id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's projects, most recent first.
    pub async fn list_by_owner(
        pool: &PgPool,
        owner_user_id: &str,
    ) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects WHERE owner_user_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(owner_user_id)
            .fetch_all(pool)
            .await
    }
}
