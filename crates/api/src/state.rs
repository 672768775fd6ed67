use std::sync::Arc;

use sitesmith_core::preview::external::ExternalRenderer;
use sitesmith_core::templates::TemplateRegistry;
use sitesmith_store::{AssetMetadataStore, CommitLock, DraftStore};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via
/// `State<AppState>`.
///
/// Cheaply cloneable: everything is behind `Arc`. No per-request mutable
/// state lives here, so instances scale horizontally.
#[derive(Clone)]
pub struct AppState {
    /// Relational pool (commit path only).
    pub pool: sitesmith_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Ephemeral draft store.
    pub drafts: Arc<dyn DraftStore>,
    /// Distributed commit lock.
    pub commit_lock: Arc<dyn CommitLock>,
    /// Blob metadata adapter for logo lookups.
    pub assets: Arc<dyn AssetMetadataStore>,
    /// Immutable template registry, loaded once at startup.
    pub templates: Arc<TemplateRegistry>,
    /// Optional external preview backend. Absent in the default deployment.
    pub external_renderer: Option<Arc<dyn ExternalRenderer>>,
}
