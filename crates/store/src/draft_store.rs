use async_trait::async_trait;
use sitesmith_core::draft::Draft;

use crate::error::StoreError;

/// Upper bound on compare-and-set retries in
/// [`DraftStore::update_with_lock`].
pub const MAX_CAS_ATTEMPTS: u32 = 3;

/// An in-place draft mutation applied under compare-and-set.
///
/// Transforms are infallible: validation and any I/O (asset lookups) happen
/// before entering the retry loop, so a retried transform never repeats
/// side effects.
pub type DraftTransform<'a> = Box<dyn FnMut(&mut Draft) + Send + 'a>;

/// The TTL key-value store holding drafts under `draft:{draftId}`.
///
/// Expiry is authoritative: a record whose TTL elapsed is indistinguishable
/// from one that never existed. The effective TTL on every write is the
/// shorter of the draft's `ttlSeconds` and its remaining semantic lifetime
/// (`expiresAt - now`). Single-key operations never block another key.
#[async_trait]
pub trait DraftStore: Send + Sync {
    /// Store a new draft (set-if-absent with TTL).
    async fn save(&self, draft: &Draft) -> Result<(), StoreError>;

    /// Replace an existing draft, refreshing its TTL (set-if-present).
    async fn update(&self, draft: &Draft) -> Result<(), StoreError>;

    /// Fetch a draft. With `slide`, a hit resets the TTL to the draft's
    /// full `ttlSeconds`. Corrupt blobs are deleted and read as `None`.
    async fn find_by_id(&self, draft_id: &str, slide: bool)
        -> Result<Option<Draft>, StoreError>;

    /// Whether a live record exists.
    async fn exists(&self, draft_id: &str) -> Result<bool, StoreError>;

    /// Remove a draft. Idempotent.
    async fn delete(&self, draft_id: &str) -> Result<(), StoreError>;

    /// Remaining TTL in whole seconds, or `None` when absent/expired.
    async fn get_ttl(&self, draft_id: &str) -> Result<Option<i64>, StoreError>;

    /// Read-modify-write under optimistic compare-and-set, retried up to
    /// [`MAX_CAS_ATTEMPTS`] times. Returns the stored post-image.
    async fn update_with_lock(
        &self,
        draft_id: &str,
        apply: DraftTransform<'_>,
    ) -> Result<Draft, StoreError>;
}
