//! Blob-metadata adapter: the only view the service has of uploaded logos.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use sitesmith_core::brand::AssetInfo;
use tokio::sync::RwLock;

use crate::error::StoreError;

/// Read-only access to asset metadata by id. The blob itself never crosses
/// this boundary.
#[async_trait]
pub trait AssetMetadataStore: Send + Sync {
    async fn find(&self, asset_id: &str) -> Result<Option<AssetInfo>, StoreError>;
}

/// In-process registry, used by tests and local development seeding.
#[derive(Default)]
pub struct MemoryAssetStore {
    assets: RwLock<HashMap<String, AssetInfo>>,
}

impl MemoryAssetStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, asset: AssetInfo) {
        self.assets
            .write()
            .await
            .insert(asset.asset_id.clone(), asset);
    }
}

#[async_trait]
impl AssetMetadataStore for MemoryAssetStore {
    async fn find(&self, asset_id: &str) -> Result<Option<AssetInfo>, StoreError> {
        Ok(self.assets.read().await.get(asset_id).cloned())
    }
}

/// HTTP client against the asset service's metadata endpoint
/// (`GET {base}/assets/{id}/metadata`).
pub struct HttpAssetMetadataStore {
    client: reqwest::Client,
    base_url: String,
}

impl HttpAssetMetadataStore {
    pub fn new(base_url: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("Failed to build asset metadata HTTP client");
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl AssetMetadataStore for HttpAssetMetadataStore {
    async fn find(&self, asset_id: &str) -> Result<Option<AssetInfo>, StoreError> {
        let url = format!("{}/assets/{asset_id}/metadata", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(StoreError::Backend(format!(
                "asset metadata returned HTTP {}",
                response.status().as_u16()
            )));
        }
        response
            .json::<AssetInfo>()
            .await
            .map(Some)
            .map_err(|e| StoreError::Serialization(e.to_string()))
    }
}
