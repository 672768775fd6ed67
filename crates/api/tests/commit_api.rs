//! Integration tests for the commit protocol: authentication, idempotency,
//! and the concurrent-commit invariant.

mod common;

use axum::http::{Method, StatusCode};
use common::{
    body_json, commit_draft, create_draft, get, send_json_with_headers,
    tech_draft_payload, TEST_INTERNAL_TOKEN,
};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn commit_requires_the_internal_token(pool: PgPool) {
    let app = common::build_test_app(pool).await;
    let draft_id = create_draft(app.clone(), tech_draft_payload()).await;
    let uri = format!("/api/v1/drafts/{draft_id}/commit");
    let body = json!({"owner": {"userId": "usr_A"}});

    let missing = send_json_with_headers(app.clone(), Method::POST, &uri, body.clone(), &[]).await;
    assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(missing).await["error"], "UNAUTHORIZED");

    let wrong = send_json_with_headers(
        app.clone(),
        Method::POST,
        &uri,
        body,
        &[("x-internal-token", "not-the-secret")],
    )
    .await;
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);

    // The draft is untouched by rejected attempts.
    let still_there = get(app, &format!("/api/v1/drafts/{draft_id}")).await;
    assert_eq!(still_there.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn commit_migrates_the_draft(pool: PgPool) {
    let app = common::build_test_app(pool.clone()).await;
    let draft_id = create_draft(app.clone(), tech_draft_payload()).await;

    let response = commit_draft(app.clone(), &draft_id, "usr_A").await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;

    assert_eq!(json["status"], "MIGRATED");
    let project_id = json["projectId"].as_str().unwrap().to_string();
    let config_id = json["configId"].as_str().unwrap().to_string();
    assert!(project_id.starts_with("prj_"));
    assert!(config_id.starts_with("cfg_"));

    // The commit is terminal: the draft is gone.
    let gone = get(app, &format!("/api/v1/drafts/{draft_id}")).await;
    assert_eq!(gone.status(), StatusCode::NOT_FOUND);

    // Both rows are durable and linked.
    let (owner, db_draft_id): (String, String) = sqlx::query_as(
        "SELECT owner_user_id, draft_id FROM projects WHERE project_id = $1",
    )
    .bind(&project_id)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(owner, "usr_A");
    assert_eq!(db_draft_id, draft_id);

    let (hash,): (String,) =
        sqlx::query_as("SELECT config_hash FROM project_configs WHERE config_id = $1")
            .bind(&config_id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(hash.len(), 64);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn commit_is_idempotent(pool: PgPool) {
    let app = common::build_test_app(pool.clone()).await;
    let draft_id = create_draft(app.clone(), tech_draft_payload()).await;

    let first = commit_draft(app.clone(), &draft_id, "usr_A").await;
    assert_eq!(first.status(), StatusCode::CREATED);
    let first = body_json(first).await;

    for _ in 0..2 {
        let replay = commit_draft(app.clone(), &draft_id, "usr_A").await;
        assert_eq!(replay.status(), StatusCode::OK);
        let replay = body_json(replay).await;
        assert_eq!(replay["status"], "ALREADY_COMMITTED");
        assert_eq!(replay["projectId"], first["projectId"]);
        assert_eq!(replay["configId"], first["configId"]);
    }

    let (count,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM projects WHERE draft_id = $1")
            .bind(&draft_id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(count, 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn commit_of_missing_draft_is_404(pool: PgPool) {
    let app = common::build_test_app(pool.clone()).await;
    let response = commit_draft(app, "drf_never_existed", "usr_A").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "DRAFT_NOT_FOUND");

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM projects")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn commit_of_expired_draft_is_404_and_writes_nothing(pool: PgPool) {
    let app = common::build_test_app(pool.clone()).await;
    let draft_id = create_draft(
        app.clone(),
        json!({
            "brandName": "Мимолётная",
            "industry": {"code": "tech"},
            "ttlSeconds": 1,
        }),
    )
    .await;

    tokio::time::sleep(std::time::Duration::from_millis(1200)).await;

    let response = commit_draft(app, &draft_id, "usr_A").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM projects")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn empty_owner_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool).await;
    let draft_id = create_draft(app.clone(), tech_draft_payload()).await;

    let response = send_json_with_headers(
        app,
        Method::POST,
        &format!("/api/v1/drafts/{draft_id}/commit"),
        json!({"owner": {"userId": "  "}}),
        &[("x-internal-token", TEST_INTERNAL_TOKEN)],
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn concurrent_commits_write_exactly_one_project(pool: PgPool) {
    let app = common::build_test_app(pool.clone()).await;
    let draft_id = create_draft(app.clone(), tech_draft_payload()).await;

    let mut tasks = tokio::task::JoinSet::new();
    for _ in 0..100 {
        let app = app.clone();
        let draft_id = draft_id.clone();
        tasks.spawn(async move {
            let response = commit_draft(app, &draft_id, "usr_A").await;
            let status = response.status();
            let body = body_json(response).await;
            (status, body)
        });
    }

    let mut created = 0;
    let mut project_ids = std::collections::HashSet::new();
    while let Some(result) = tasks.join_next().await {
        let (status, body) = result.unwrap();
        if status == StatusCode::CREATED || status == StatusCode::OK {
            if status == StatusCode::CREATED {
                created += 1;
            }
            project_ids.insert(body["projectId"].as_str().unwrap().to_string());
        } else if status == StatusCode::CONFLICT {
            // Lock contention is an acceptable answer to a racing caller.
            assert_eq!(body["error"], "COMMIT_IN_PROGRESS");
        } else {
            panic!("unexpected commit status {status}");
        }
    }

    assert_eq!(created, 1, "exactly one commit may win");
    assert!(project_ids.len() <= 1, "all successes must agree on the project");

    let (count,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM projects WHERE draft_id = $1")
            .bind(&draft_id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(count, 1);
}
