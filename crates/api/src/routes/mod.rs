pub mod drafts;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// POST   /drafts                      create draft (anonymous)
/// GET    /drafts/{draftId}            read draft, no TTL slide
/// PATCH  /drafts/{draftId}            partial update, slides TTL
/// GET    /drafts/{draftId}/preview    preview (?type=html|json), slides TTL
/// POST   /drafts/{draftId}/commit     commit (X-Internal-Token)
/// GET    /p/{draftId}                 direct HTML preview, slides TTL
/// GET    /health                      service + database health
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(drafts::router()).merge(health::router())
}
