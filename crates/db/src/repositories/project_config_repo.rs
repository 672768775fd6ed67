//! Repository for the `project_configs` table.

use sqlx::PgPool;

use crate::models::project_config::ProjectConfig;

const COLUMNS: &str = "config_id, project_id, schema_version, config_version, template_id, \
                       template_version, config_json, config_hash, created_at";

/// Read access to committed configurations.
pub struct ProjectConfigRepo;

impl ProjectConfigRepo {
    /// Find a configuration by its id.
    pub async fn find_by_id(
        pool: &PgPool,
        config_id: &str,
    ) -> Result<Option<ProjectConfig>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM project_configs WHERE config_id = $1");
        sqlx::query_as::<_, ProjectConfig>(&query)
            .bind(config_id)
            .fetch_optional(pool)
            .await
    }

    /// The most recent configuration of a project. Used to answer
    /// idempotent commit replays with the original identifiers.
    pub async fn find_latest_by_project_id(
        pool: &PgPool,
        project_id: &str,
    ) -> Result<Option<ProjectConfig>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM project_configs \
             WHERE project_id = $1 ORDER BY created_at DESC LIMIT 1"
        );
        sqlx::query_as::<_, ProjectConfig>(&query)
            .bind(project_id)
            .fetch_optional(pool)
            .await
    }
}
