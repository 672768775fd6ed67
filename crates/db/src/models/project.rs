//! Project entity model and insert DTO.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// Status values permitted by the `projects.status` check constraint.
pub const STATUS_DRAFT: &str = "DRAFT";
pub const STATUS_READY: &str = "READY";
pub const STATUS_PUBLISHED: &str = "PUBLISHED";
pub const STATUS_ARCHIVED: &str = "ARCHIVED";

/// A row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub project_id: String,
    pub owner_user_id: String,
    pub owner_tenant_id: Option<String>,
    pub draft_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub status: String,
}

/// Insert payload for a freshly committed project.
#[derive(Debug, Clone)]
pub struct NewProject {
    pub project_id: String,
    pub owner_user_id: String,
    pub owner_tenant_id: Option<String>,
    pub draft_id: String,
    pub created_at: DateTime<Utc>,
}
