//! Project configuration model and insert DTO.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `project_configs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectConfig {
    pub config_id: String,
    pub project_id: String,
    pub schema_version: i32,
    pub config_version: String,
    pub template_id: String,
    pub template_version: i32,
    pub config_json: serde_json::Value,
    pub config_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for a committed configuration.
#[derive(Debug, Clone)]
pub struct NewProjectConfig {
    pub config_id: String,
    pub schema_version: i32,
    pub config_version: String,
    pub template_id: String,
    pub template_version: i32,
    pub config_json: serde_json::Value,
    pub config_hash: String,
    pub created_at: DateTime<Utc>,
}
