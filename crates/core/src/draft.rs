//! The draft entity: a temporary brand/industry/logo record with a bounded,
//! sliding lifetime.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::brand::BrandProfile;
use crate::error::CoreError;
use crate::generator;
use crate::industry;
use crate::types::{self, Timestamp};

/// The only status a draft carries while it lives in the ephemeral store.
pub const DRAFT_STATUS: &str = "DRAFT";

/// Where a draft came from. Recorded in [`DraftMeta::source`].
pub const SOURCE_WEB: &str = "web";

/// Which engine/template produced configs for this draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratorMeta {
    pub engine: String,
    pub engine_version: String,
    pub template_id: String,
    pub locale: String,
}

/// Preview output mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreviewMode {
    Html,
    Json,
}

/// Last-preview bookkeeping. Updated on every preview render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewMeta {
    pub mode: PreviewMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(
        default,
        with = "types::iso_millis_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_generated_at: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,
}

/// Request-provenance metadata. Hashes only, never raw addresses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent_hash: Option<String>,
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// The primary temporary object of the service.
///
/// Invariants, maintained by [`Draft::new`] and [`Draft::touch`]:
/// `createdAt ≤ updatedAt ≤ expiresAt` and
/// `expiresAt = updatedAt + ttlSeconds`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
    pub schema_version: i32,
    pub draft_id: String,
    pub status: String,
    #[serde(with = "types::iso_millis")]
    pub created_at: Timestamp,
    #[serde(with = "types::iso_millis")]
    pub updated_at: Timestamp,
    #[serde(with = "types::iso_millis")]
    pub expires_at: Timestamp,
    pub ttl_seconds: i64,
    pub brand_profile: BrandProfile,
    pub generator: GeneratorMeta,
    pub preview: PreviewMeta,
    pub meta: DraftMeta,
}

impl Draft {
    /// Create a fresh draft around a validated brand profile.
    ///
    /// The template id is fixed at creation from the industry mapping and
    /// updated again if the industry changes (see [`Draft::set_brand_profile`]).
    pub fn new(
        brand_profile: BrandProfile,
        ttl_seconds: i64,
        source: &str,
        now: Timestamp,
    ) -> Result<Self, CoreError> {
        if ttl_seconds <= 0 {
            return Err(CoreError::InvalidInput(
                "Draft TTL must be positive".to_string(),
            ));
        }
        let now = types::truncate_to_millis(now);
        let template_id = industry::template_for(&brand_profile.industry.code);
        Ok(Self {
            schema_version: types::SCHEMA_VERSION,
            draft_id: types::new_draft_id(),
            status: DRAFT_STATUS.to_string(),
            created_at: now,
            updated_at: now,
            expires_at: now + Duration::seconds(ttl_seconds),
            ttl_seconds,
            brand_profile,
            generator: GeneratorMeta {
                engine: generator::ENGINE.to_string(),
                engine_version: generator::ENGINE_VERSION.to_string(),
                template_id: template_id.to_string(),
                locale: generator::DEFAULT_LOCALE.to_string(),
            },
            preview: PreviewMeta {
                mode: PreviewMode::Html,
                url: None,
                last_generated_at: None,
                etag: None,
            },
            meta: DraftMeta {
                ip_hash: None,
                user_agent_hash: None,
                source: source.to_string(),
                notes: None,
            },
        })
    }

    /// Slide the lifetime: `updatedAt = now`, `expiresAt = now + ttl`.
    pub fn touch(&mut self, now: Timestamp) {
        let now = types::truncate_to_millis(now);
        self.updated_at = now;
        self.expires_at = now + Duration::seconds(self.ttl_seconds);
    }

    /// Replace the brand profile and re-derive the template mapping.
    pub fn set_brand_profile(&mut self, profile: BrandProfile) {
        self.generator.template_id =
            industry::template_for(&profile.industry.code).to_string();
        self.brand_profile = profile;
    }

    /// Semantic expiry check, independent of the store's TTL. Covers clock
    /// skew between the store and the service.
    pub fn is_expired(&self, now: Timestamp) -> bool {
        self.expires_at <= now
    }

    /// Seconds until semantic expiry (negative once elapsed).
    pub fn remaining_ttl_seconds(&self, now: Timestamp) -> i64 {
        (self.expires_at - now).num_seconds()
    }
}
