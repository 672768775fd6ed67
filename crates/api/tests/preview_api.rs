//! Integration tests for the preview endpoints: rendering, escaping,
//! conditional requests, and TTL sliding.

mod common;

use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use common::{
    body_json, body_string, create_draft, get, get_with_headers, patch_json,
    tech_draft_payload,
};
use serde_json::json;
use sqlx::PgPool;

fn etag_of(response: &axum::response::Response) -> String {
    response
        .headers()
        .get("etag")
        .expect("preview must carry an ETag")
        .to_str()
        .unwrap()
        .to_string()
}

fn parse_time(value: &serde_json::Value) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(value.as_str().unwrap())
        .unwrap()
        .with_timezone(&Utc)
}

#[sqlx::test(migrations = "../db/migrations")]
async fn html_preview_renders_the_brand(pool: PgPool) {
    let app = common::build_test_app(pool).await;
    let draft_id = create_draft(app.clone(), tech_draft_payload()).await;

    let response = get(app, &format!("/api/v1/drafts/{draft_id}/preview")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap()
        .starts_with("text/html"));

    let etag = etag_of(&response);
    assert!(etag.starts_with("W/\"cfg_"), "got {etag}");

    let html = body_string(response).await;
    assert!(html.contains("<h1>Кодовая — IT-услуги для роста бизнеса</h1>"));
    assert!(html.starts_with("<!doctype html>"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn json_preview_shares_the_etag(pool: PgPool) {
    let app = common::build_test_app(pool).await;
    let draft_id = create_draft(app.clone(), tech_draft_payload()).await;

    let html =
        get(app.clone(), &format!("/api/v1/drafts/{draft_id}/preview?type=html")).await;
    let json_resp =
        get(app, &format!("/api/v1/drafts/{draft_id}/preview?type=json")).await;

    assert_eq!(etag_of(&html), etag_of(&json_resp));

    let model = body_json(json_resp).await;
    assert_eq!(model["brand"]["name"], "Кодовая");
    assert_eq!(model["brand"]["slug"], "kodovaya");
    assert!(model["pages"].is_array());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_preview_type_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool).await;
    let draft_id = create_draft(app.clone(), tech_draft_payload()).await;

    let response =
        get(app, &format!("/api/v1/drafts/{draft_id}/preview?type=xml")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn if_none_match_short_circuits(pool: PgPool) {
    let app = common::build_test_app(pool).await;
    let draft_id = create_draft(app.clone(), tech_draft_payload()).await;
    let uri = format!("/api/v1/drafts/{draft_id}/preview");

    let first = get(app.clone(), &uri).await;
    let etag = etag_of(&first);

    let second = get_with_headers(app.clone(), &uri, &[("if-none-match", &etag)]).await;
    assert_eq!(second.status(), StatusCode::NOT_MODIFIED);
    assert_eq!(etag_of(&second), etag);

    // Stability: an unchanged draft keeps its tag across repeated renders.
    let third = get(app, &uri).await;
    assert_eq!(etag_of(&third), etag);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn update_invalidates_the_etag(pool: PgPool) {
    let app = common::build_test_app(pool).await;
    let draft_id = create_draft(app.clone(), tech_draft_payload()).await;
    let uri = format!("/api/v1/drafts/{draft_id}/preview");

    let first = get(app.clone(), &uri).await;
    let old_etag = etag_of(&first);

    patch_json(
        app.clone(),
        &format!("/api/v1/drafts/{draft_id}"),
        json!({"brandName": "Другая"}),
    )
    .await;

    let second = get_with_headers(app, &uri, &[("if-none-match", &old_etag)]).await;
    assert_eq!(second.status(), StatusCode::OK);
    assert_ne!(etag_of(&second), old_etag);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn script_in_brand_name_renders_escaped(pool: PgPool) {
    let app = common::build_test_app(pool).await;
    let draft_id = create_draft(
        app.clone(),
        json!({
            "brandName": "Tech<script>alert('xss')</script>Corp",
            "industry": {"code": "tech"},
        }),
    )
    .await;

    let response = get(app, &format!("/api/v1/drafts/{draft_id}/preview")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_string(response).await;
    assert!(!html.contains("<script>"));
    assert!(!html.contains("alert('xss')"));
    assert!(html.contains("&lt;script&gt;"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn direct_preview_serves_html(pool: PgPool) {
    let app = common::build_test_app(pool).await;
    let draft_id = create_draft(app.clone(), tech_draft_payload()).await;

    let response = get(app, &format!("/api/v1/p/{draft_id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("<h1>Кодовая — IT-услуги для роста бизнеса</h1>"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn preview_slides_the_ttl(pool: PgPool) {
    let app = common::build_test_app(pool).await;
    let draft_id = create_draft(app.clone(), tech_draft_payload()).await;

    let before = body_json(get(app.clone(), &format!("/api/v1/drafts/{draft_id}")).await).await;

    tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    get(app.clone(), &format!("/api/v1/drafts/{draft_id}/preview")).await;

    let after = body_json(get(app, &format!("/api/v1/drafts/{draft_id}")).await).await;
    assert!(parse_time(&after["expiresAt"]) > parse_time(&before["expiresAt"]));
    assert_eq!(after["preview"]["mode"], "html");
    assert!(after["preview"]["etag"].as_str().unwrap().starts_with("W/\"cfg_"));
    assert_eq!(
        after["preview"]["url"],
        format!("/api/v1/p/{draft_id}")
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn preview_of_missing_draft_is_404(pool: PgPool) {
    let app = common::build_test_app(pool).await;
    let response = get(app, "/api/v1/drafts/drf_nope/preview").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
