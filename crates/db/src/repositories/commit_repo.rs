//! The atomic commit write: one project plus one configuration, in a
//! single transaction.

use sqlx::PgPool;

use crate::models::project::{NewProject, STATUS_DRAFT};
use crate::models::project_config::NewProjectConfig;

/// Outcome of the transactional insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitInsert {
    /// Both rows were written.
    Inserted,
    /// `uq_projects_draft_id` fired: another writer committed this draft
    /// first. The caller re-reads and returns the existing records.
    DuplicateDraft,
}

pub struct CommitRepo;

impl CommitRepo {
    /// Insert the project and its configuration atomically.
    ///
    /// A unique violation on the draft id rolls the transaction back and
    /// reports [`CommitInsert::DuplicateDraft`] instead of an error; every
    /// other failure propagates.
    pub async fn insert_project_with_config(
        pool: &PgPool,
        project: &NewProject,
        config: &NewProjectConfig,
    ) -> Result<CommitInsert, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let inserted = sqlx::query(
            "INSERT INTO projects \
                (project_id, owner_user_id, owner_tenant_id, draft_id, \
                 created_at, updated_at, status) \
             VALUES ($1, $2, $3, $4, $5, $5, $6)",
        )
        .bind(&project.project_id)
        .bind(&project.owner_user_id)
        .bind(&project.owner_tenant_id)
        .bind(&project.draft_id)
        .bind(project.created_at)
        .bind(STATUS_DRAFT)
        .execute(&mut *tx)
        .await;

        if let Err(err) = inserted {
            if is_draft_unique_violation(&err) {
                tx.rollback().await?;
                return Ok(CommitInsert::DuplicateDraft);
            }
            return Err(err);
        }

        sqlx::query(
            "INSERT INTO project_configs \
                (config_id, project_id, schema_version, config_version, \
                 template_id, template_version, config_json, config_hash, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
        )
        .bind(&config.config_id)
        .bind(&project.project_id)
        .bind(config.schema_version)
        .bind(&config.config_version)
        .bind(&config.template_id)
        .bind(config.template_version)
        .bind(&config.config_json)
        .bind(&config.config_hash)
        .bind(config.created_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(CommitInsert::Inserted)
    }
}

/// PostgreSQL unique violation (23505) on the draft-id constraint.
fn is_draft_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            db_err.code().as_deref() == Some("23505")
                && db_err.constraint() == Some("uq_projects_draft_id")
        }
        _ => false,
    }
}
