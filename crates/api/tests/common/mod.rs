// Shared test helpers. Not every test binary uses every helper, so
// dead_code warnings are suppressed at the module level.
#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request};
use axum::Router;
use chrono::Utc;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use sitesmith_api::config::ServerConfig;
use sitesmith_api::router::build_app_router;
use sitesmith_api::state::AppState;
use sitesmith_core::brand::AssetInfo;
use sitesmith_core::templates::TemplateRegistry;
use sitesmith_store::{MemoryAssetStore, MemoryCommitLock, MemoryDraftStore};

/// Shared secret wired into the test config and used by commit tests.
pub const TEST_INTERNAL_TOKEN: &str = "test-internal-token";

/// Asset id pre-seeded into the in-process asset registry.
pub const SEEDED_ASSET_ID: &str = "ast_x";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        draft_store_url: "memory://".to_string(),
        draft_ttl_secs: 86400,
        commit_lock_ttl_secs: 30,
        internal_commit_token: TEST_INTERNAL_TOKEN.to_string(),
        asset_base_url: None,
    }
}

/// Build the full application router with all middleware layers, a fresh
/// in-process draft store, and one seeded logo asset.
///
/// Delegates to [`build_app_router`] so integration tests exercise the same
/// middleware stack (CORS, request ID, timeout, tracing, panic recovery)
/// that production uses.
pub async fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();

    let assets = MemoryAssetStore::new();
    assets
        .insert(AssetInfo {
            asset_id: SEEDED_ASSET_ID.to_string(),
            url: format!("https://assets.example/{SEEDED_ASSET_ID}.png"),
            mime_type: "image/png".to_string(),
            width: Some(256),
            height: Some(256),
            bytes: 2048,
            sha256: "hhh".to_string(),
            uploaded_at: Utc::now(),
        })
        .await;

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        drafts: Arc::new(MemoryDraftStore::new()),
        commit_lock: Arc::new(MemoryCommitLock::new()),
        assets: Arc::new(assets),
        templates: Arc::new(TemplateRegistry::builtin()),
        external_renderer: None,
    };

    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Shared HTTP test helpers
// ---------------------------------------------------------------------------

/// Collect the response body into a `serde_json::Value`.
pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Collect the response body into a `String`.
pub async fn body_string(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Send a JSON request with the given HTTP method and extra headers.
pub async fn send_json_with_headers(
    app: Router,
    method: Method,
    uri: &str,
    body: serde_json::Value,
    headers: &[(&str, &str)],
) -> axum::response::Response {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    let request = builder
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a JSON request with the given HTTP method.
pub async fn send_json(
    app: Router,
    method: Method,
    uri: &str,
    body: serde_json::Value,
) -> axum::response::Response {
    send_json_with_headers(app, method, uri, body, &[]).await
}

/// POST JSON to the given URI and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: serde_json::Value,
) -> axum::response::Response {
    send_json(app, Method::POST, uri, body).await
}

/// PATCH JSON to the given URI and return the response.
pub async fn patch_json(
    app: Router,
    uri: &str,
    body: serde_json::Value,
) -> axum::response::Response {
    send_json(app, Method::PATCH, uri, body).await
}

/// GET the given URI and return the response.
pub async fn get(app: Router, uri: &str) -> axum::response::Response {
    get_with_headers(app, uri, &[]).await
}

/// GET with extra request headers.
pub async fn get_with_headers(
    app: Router,
    uri: &str,
    headers: &[(&str, &str)],
) -> axum::response::Response {
    let mut builder = Request::builder().method(Method::GET).uri(uri);
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    let request = builder.body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

// ---------------------------------------------------------------------------
// Draft fixtures
// ---------------------------------------------------------------------------

/// Create a draft over HTTP and return its id.
pub async fn create_draft(app: Router, body: serde_json::Value) -> String {
    let response = post_json(app, "/api/v1/drafts", body).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    let json = body_json(response).await;
    json["draftId"].as_str().unwrap().to_string()
}

/// The canonical happy-path create payload.
pub fn tech_draft_payload() -> serde_json::Value {
    serde_json::json!({
        "brandName": "Кодовая",
        "industry": {"code": "tech"},
        "logo": {"assetId": SEEDED_ASSET_ID},
    })
}

/// Commit a draft with the test internal token.
pub async fn commit_draft(
    app: Router,
    draft_id: &str,
    user_id: &str,
) -> axum::response::Response {
    send_json_with_headers(
        app,
        Method::POST,
        &format!("/api/v1/drafts/{draft_id}/commit"),
        serde_json::json!({"owner": {"userId": user_id}}),
        &[("x-internal-token", TEST_INTERNAL_TOKEN)],
    )
    .await
}
