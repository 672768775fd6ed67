//! Route definitions for drafts, previews, and the commit endpoint.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{commit, drafts, preview};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/drafts", post(drafts::create))
        .route(
            "/drafts/{draft_id}",
            get(drafts::get_by_id).patch(drafts::update),
        )
        .route("/drafts/{draft_id}/preview", get(preview::preview))
        .route("/drafts/{draft_id}/commit", post(commit::commit))
        .route("/p/{draft_id}", get(preview::direct_html))
}
