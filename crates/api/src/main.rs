use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sitesmith_api::config::ServerConfig;
use sitesmith_api::router::build_app_router;
use sitesmith_api::state::AppState;
use sitesmith_core::templates::TemplateRegistry;
use sitesmith_store::{
    AssetMetadataStore, CommitLock, DraftStore, HttpAssetMetadataStore, MemoryAssetStore,
    MemoryCommitLock, MemoryDraftStore,
};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sitesmith_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = sitesmith_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    sitesmith_db::health_check(&pool)
        .await
        .expect("Database health check failed");

    sitesmith_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Ephemeral stores ---
    let (drafts, commit_lock) = build_draft_store(&config);
    tracing::info!(url = %config.draft_store_url, "Draft store ready");

    // --- Asset metadata adapter ---
    let assets: Arc<dyn AssetMetadataStore> = match &config.asset_base_url {
        Some(base_url) => {
            tracing::info!(base_url, "Using HTTP asset metadata adapter");
            Arc::new(HttpAssetMetadataStore::new(base_url))
        }
        None => {
            tracing::warn!("ASSET_BASE_URL unset, using in-process asset registry");
            Arc::new(MemoryAssetStore::new())
        }
    };

    // --- Template registry ---
    let templates = Arc::new(TemplateRegistry::builtin());
    tracing::info!(count = templates.template_ids().len(), "Template registry loaded");

    // --- App state ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        drafts,
        commit_lock,
        assets,
        templates,
        external_renderer: None,
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Construct the draft store and commit lock backends from the configured
/// URL. Unknown schemes fail startup: misconfiguration must not silently
/// degrade into an empty in-process store in production.
fn build_draft_store(config: &ServerConfig) -> (Arc<dyn DraftStore>, Arc<dyn CommitLock>) {
    match config.draft_store_url.as_str() {
        "memory://" => (
            Arc::new(MemoryDraftStore::new()),
            Arc::new(MemoryCommitLock::new()),
        ),
        other => panic!("Unsupported DRAFT_STORE_URL '{other}' (expected memory://)"),
    }
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server shuts
/// down cleanly whether stopped interactively or by a process manager.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
