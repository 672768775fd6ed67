//! Preview handlers: `/drafts/{id}/preview` and the direct HTML view
//! `/p/{id}`. Both slide the draft TTL.

use axum::extract::{Path, Query, State};
use axum::http::header::{ETAG, IF_NONE_MATCH};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use chrono::Utc;
use serde::Deserialize;
use sitesmith_core::draft::{Draft, PreviewMode};
use sitesmith_core::error::CoreError;
use sitesmith_core::generator;
use sitesmith_core::preview::external::render_with_fallback;
use sitesmith_core::preview::{Preview, PreviewBody};

use crate::error::{AppError, AppResult};
use crate::handlers::drafts::load_live_draft;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct PreviewParams {
    /// `html` (default) or `json`.
    #[serde(rename = "type")]
    pub format: Option<String>,
}

fn parse_mode(params: &PreviewParams) -> AppResult<PreviewMode> {
    match params.format.as_deref() {
        None | Some("html") => Ok(PreviewMode::Html),
        Some("json") => Ok(PreviewMode::Json),
        Some(other) => Err(AppError::Core(CoreError::InvalidInput(format!(
            "Unknown preview type '{other}', expected html or json"
        )))),
    }
}

/// GET /api/v1/drafts/{draft_id}/preview?type=html|json
pub async fn preview(
    State(state): State<AppState>,
    Path(draft_id): Path<String>,
    Query(params): Query<PreviewParams>,
    headers: HeaderMap,
) -> AppResult<Response> {
    let mode = parse_mode(&params)?;
    render_draft(&state, &draft_id, mode, &headers).await
}

/// GET /api/v1/p/{draft_id} -- direct HTML preview.
pub async fn direct_html(
    State(state): State<AppState>,
    Path(draft_id): Path<String>,
    headers: HeaderMap,
) -> AppResult<Response> {
    render_draft(&state, &draft_id, PreviewMode::Html, &headers).await
}

async fn render_draft(
    state: &AppState,
    draft_id: &str,
    mode: PreviewMode,
    headers: &HeaderMap,
) -> AppResult<Response> {
    // The slide happens on the read; the metadata writeback below also
    // re-anchors the draft's semantic expiry.
    let draft = load_live_draft(state, draft_id, true).await?;

    let config = generator::generate(&draft, &state.templates, Utc::now())?;
    let preview = render_with_fallback(
        &config,
        mode,
        state.external_renderer.as_deref(),
    )?;

    write_preview_meta(state, draft_id, mode, &preview).await;

    let etag_header = HeaderValue::from_str(&preview.etag)
        .map_err(|e| AppError::Internal(format!("invalid etag header: {e}")))?;

    if if_none_match_hits(headers, &preview.etag) {
        let mut response = StatusCode::NOT_MODIFIED.into_response();
        response.headers_mut().insert(ETAG, etag_header);
        return Ok(response);
    }

    let mut response = match preview.body {
        PreviewBody::Html(html) => Html(html).into_response(),
        PreviewBody::Json(model) => axum::Json(model).into_response(),
    };
    response.headers_mut().insert(ETAG, etag_header);
    Ok(response)
}

/// Record the render on the draft and slide its semantic expiry. Preview
/// metadata is bookkeeping: a lost writeback only costs the next request a
/// regeneration, so failures are logged and swallowed.
async fn write_preview_meta(
    state: &AppState,
    draft_id: &str,
    mode: PreviewMode,
    preview: &Preview,
) {
    let now = Utc::now();
    let etag = preview.etag.clone();
    let generated_at = preview.generated_at;
    let url = format!("/api/v1/p/{draft_id}");

    let result = state
        .drafts
        .update_with_lock(
            draft_id,
            Box::new(move |draft: &mut Draft| {
                draft.preview.mode = mode;
                draft.preview.url = Some(url.clone());
                draft.preview.last_generated_at = Some(generated_at);
                draft.preview.etag = Some(etag.clone());
                draft.touch(now);
            }),
        )
        .await;

    if let Err(e) = result {
        tracing::warn!(draft_id, error = %e, "Preview metadata writeback failed");
    }
}

/// Weak comparison: the stored tag matches itself with or without the `W/`
/// prefix, and `*` matches anything.
fn if_none_match_hits(headers: &HeaderMap, etag: &str) -> bool {
    let Some(candidate) = headers.get(IF_NONE_MATCH).and_then(|v| v.to_str().ok()) else {
        return false;
    };
    if candidate.trim() == "*" {
        return true;
    }
    let bare = etag.trim_start_matches("W/");
    candidate
        .split(',')
        .map(str::trim)
        .any(|c| c == etag || c.trim_start_matches("W/") == bare)
}
