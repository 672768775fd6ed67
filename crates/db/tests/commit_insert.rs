//! Integration tests for the transactional commit write and the
//! idempotency probes.

use chrono::Utc;
use sitesmith_db::models::project::NewProject;
use sitesmith_db::models::project_config::NewProjectConfig;
use sitesmith_db::repositories::{CommitInsert, CommitRepo, ProjectConfigRepo, ProjectRepo};
use sqlx::PgPool;

fn new_project(project_id: &str, draft_id: &str) -> NewProject {
    NewProject {
        project_id: project_id.to_string(),
        owner_user_id: "usr_A".to_string(),
        owner_tenant_id: None,
        draft_id: draft_id.to_string(),
        created_at: Utc::now(),
    }
}

fn new_config(config_id: &str) -> NewProjectConfig {
    NewProjectConfig {
        config_id: config_id.to_string(),
        schema_version: 1,
        config_version: "1.0.0".to_string(),
        template_id: "tech".to_string(),
        template_version: 2,
        config_json: serde_json::json!({"brand": {"name": "Acme"}}),
        config_hash: "f".repeat(64),
        created_at: Utc::now(),
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn insert_writes_both_rows(pool: PgPool) {
    let outcome = CommitRepo::insert_project_with_config(
        &pool,
        &new_project("prj_1", "drf_1"),
        &new_config("cfg_1"),
    )
    .await
    .unwrap();
    assert_eq!(outcome, CommitInsert::Inserted);

    let project = ProjectRepo::find_by_draft_id(&pool, "drf_1")
        .await
        .unwrap()
        .expect("project row must exist");
    assert_eq!(project.project_id, "prj_1");
    assert_eq!(project.status, "DRAFT");
    assert_eq!(project.created_at, project.updated_at);

    let config = ProjectConfigRepo::find_latest_by_project_id(&pool, "prj_1")
        .await
        .unwrap()
        .expect("config row must exist");
    assert_eq!(config.config_id, "cfg_1");
    assert_eq!(config.template_version, 2);
}

#[sqlx::test(migrations = "./migrations")]
async fn second_insert_for_the_same_draft_is_a_duplicate(pool: PgPool) {
    CommitRepo::insert_project_with_config(
        &pool,
        &new_project("prj_1", "drf_1"),
        &new_config("cfg_1"),
    )
    .await
    .unwrap();

    let outcome = CommitRepo::insert_project_with_config(
        &pool,
        &new_project("prj_2", "drf_1"),
        &new_config("cfg_2"),
    )
    .await
    .unwrap();
    assert_eq!(outcome, CommitInsert::DuplicateDraft);

    // The losing transaction must leave no rows behind.
    assert!(ProjectRepo::find_by_id(&pool, "prj_2").await.unwrap().is_none());
    assert!(ProjectConfigRepo::find_by_id(&pool, "cfg_2").await.unwrap().is_none());

    let surviving = ProjectRepo::find_by_draft_id(&pool, "drf_1")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(surviving.project_id, "prj_1");
}

#[sqlx::test(migrations = "./migrations")]
async fn distinct_drafts_do_not_collide(pool: PgPool) {
    for (project_id, draft_id, config_id) in
        [("prj_1", "drf_1", "cfg_1"), ("prj_2", "drf_2", "cfg_2")]
    {
        let outcome = CommitRepo::insert_project_with_config(
            &pool,
            &new_project(project_id, draft_id),
            &new_config(config_id),
        )
        .await
        .unwrap();
        assert_eq!(outcome, CommitInsert::Inserted);
    }

    let mine = ProjectRepo::list_by_owner(&pool, "usr_A").await.unwrap();
    assert_eq!(mine.len(), 2);
}
