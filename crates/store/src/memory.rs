//! In-process TTL backend for the draft store.
//!
//! A `RwLock`-guarded map of versioned entries. Expiry is lazy: reads treat
//! an elapsed entry as absent and purge it. Versions back the
//! compare-and-set retry loop of `update_with_lock`.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use sitesmith_core::canonical;
use sitesmith_core::draft::Draft;
use sitesmith_core::types::Timestamp;
use tokio::sync::RwLock;

use crate::draft_store::{DraftStore, DraftTransform, MAX_CAS_ATTEMPTS};
use crate::error::StoreError;

struct Entry {
    payload: String,
    ttl_seconds: i64,
    expires_at: Timestamp,
    version: u64,
}

impl Entry {
    fn is_expired(&self, now: Timestamp) -> bool {
        self.expires_at <= now
    }
}

/// The `memory://` draft store backend.
#[derive(Default)]
pub struct MemoryDraftStore {
    entries: RwLock<HashMap<String, Entry>>,
}

impl MemoryDraftStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(draft_id: &str) -> String {
        format!("draft:{draft_id}")
    }

    /// Effective store TTL: the shorter of the draft's full TTL and its
    /// remaining semantic lifetime.
    fn effective_ttl(draft: &Draft, now: Timestamp) -> i64 {
        let remaining = (draft.expires_at - now).num_seconds();
        draft.ttl_seconds.min(remaining)
    }

    fn encode(draft: &Draft) -> Result<String, StoreError> {
        canonical::to_canonical(draft).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    fn entry_for(draft: &Draft, version: u64, now: Timestamp) -> Result<Entry, StoreError> {
        Ok(Entry {
            payload: Self::encode(draft)?,
            ttl_seconds: draft.ttl_seconds,
            expires_at: now + Duration::seconds(Self::effective_ttl(draft, now)),
            version,
        })
    }
}

#[async_trait]
impl DraftStore for MemoryDraftStore {
    async fn save(&self, draft: &Draft) -> Result<(), StoreError> {
        let now = Utc::now();
        let key = Self::key(&draft.draft_id);
        let mut entries = self.entries.write().await;
        if entries.get(&key).is_some_and(|e| !e.is_expired(now)) {
            return Err(StoreError::AlreadyExists(draft.draft_id.clone()));
        }
        entries.insert(key, Self::entry_for(draft, 0, now)?);
        Ok(())
    }

    async fn update(&self, draft: &Draft) -> Result<(), StoreError> {
        let now = Utc::now();
        let key = Self::key(&draft.draft_id);
        let mut entries = self.entries.write().await;
        let live_version = entries
            .get(&key)
            .filter(|e| !e.is_expired(now))
            .map(|e| e.version);
        match live_version {
            Some(version) => {
                entries.insert(key, Self::entry_for(draft, version + 1, now)?);
                Ok(())
            }
            None => {
                entries.remove(&key);
                Err(StoreError::NotFound(draft.draft_id.clone()))
            }
        }
    }

    async fn find_by_id(
        &self,
        draft_id: &str,
        slide: bool,
    ) -> Result<Option<Draft>, StoreError> {
        let now = Utc::now();
        let key = Self::key(draft_id);
        let mut entries = self.entries.write().await;

        let parsed = match entries.get(&key) {
            None => return Ok(None),
            Some(entry) if entry.is_expired(now) => None,
            Some(entry) => serde_json::from_str::<Draft>(&entry.payload)
                .map_err(|e| {
                    // Corrupt blob: unreadable records are as good as absent.
                    tracing::warn!(draft_id, error = %e, "Deleting corrupt draft record");
                })
                .ok(),
        };

        match parsed {
            Some(draft) => {
                if slide {
                    if let Some(entry) = entries.get_mut(&key) {
                        entry.expires_at = now + Duration::seconds(entry.ttl_seconds);
                    }
                }
                Ok(Some(draft))
            }
            None => {
                entries.remove(&key);
                Ok(None)
            }
        }
    }

    async fn exists(&self, draft_id: &str) -> Result<bool, StoreError> {
        let now = Utc::now();
        let entries = self.entries.read().await;
        Ok(entries
            .get(&Self::key(draft_id))
            .is_some_and(|e| !e.is_expired(now)))
    }

    async fn delete(&self, draft_id: &str) -> Result<(), StoreError> {
        self.entries.write().await.remove(&Self::key(draft_id));
        Ok(())
    }

    async fn get_ttl(&self, draft_id: &str) -> Result<Option<i64>, StoreError> {
        let now = Utc::now();
        let entries = self.entries.read().await;
        Ok(entries
            .get(&Self::key(draft_id))
            .filter(|e| !e.is_expired(now))
            .map(|e| (e.expires_at - now).num_seconds()))
    }

    async fn update_with_lock(
        &self,
        draft_id: &str,
        mut apply: DraftTransform<'_>,
    ) -> Result<Draft, StoreError> {
        let key = Self::key(draft_id);

        for _ in 0..MAX_CAS_ATTEMPTS {
            // Snapshot under the read lock, transform outside it.
            let (payload, version) = {
                let now = Utc::now();
                let entries = self.entries.read().await;
                match entries.get(&key) {
                    Some(e) if !e.is_expired(now) => (e.payload.clone(), e.version),
                    _ => return Err(StoreError::NotFound(draft_id.to_string())),
                }
            };

            let mut draft: Draft = match serde_json::from_str(&payload) {
                Ok(d) => d,
                Err(e) => {
                    tracing::warn!(draft_id, error = %e, "Deleting corrupt draft record");
                    self.entries.write().await.remove(&key);
                    return Err(StoreError::NotFound(draft_id.to_string()));
                }
            };
            apply(&mut draft);

            // Commit only if nobody wrote in between.
            let now = Utc::now();
            let mut entries = self.entries.write().await;
            let live_version = entries
                .get(&key)
                .filter(|e| !e.is_expired(now))
                .map(|e| e.version);
            match live_version {
                Some(v) if v == version => {
                    entries.insert(key.clone(), Self::entry_for(&draft, version + 1, now)?);
                    return Ok(draft);
                }
                Some(_) => continue,
                None => return Err(StoreError::NotFound(draft_id.to_string())),
            }
        }

        Err(StoreError::Conflict(draft_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitesmith_core::brand::{BrandProfile, IndustryInfo};
    use sitesmith_core::draft::SOURCE_WEB;
    use std::time::Duration as StdDuration;

    fn draft(ttl_seconds: i64) -> Draft {
        let profile =
            BrandProfile::new("Acme", IndustryInfo::resolve("tech", None), None).unwrap();
        Draft::new(profile, ttl_seconds, SOURCE_WEB, Utc::now()).unwrap()
    }

    #[tokio::test]
    async fn save_then_find() {
        let store = MemoryDraftStore::new();
        let d = draft(60);
        store.save(&d).await.unwrap();
        let found = store.find_by_id(&d.draft_id, false).await.unwrap().unwrap();
        assert_eq!(found, d);
        assert!(store.exists(&d.draft_id).await.unwrap());
    }

    #[tokio::test]
    async fn save_twice_is_rejected() {
        let store = MemoryDraftStore::new();
        let d = draft(60);
        store.save(&d).await.unwrap();
        assert!(matches!(
            store.save(&d).await,
            Err(StoreError::AlreadyExists(_))
        ));
    }

    #[tokio::test]
    async fn update_requires_presence() {
        let store = MemoryDraftStore::new();
        let d = draft(60);
        assert!(matches!(
            store.update(&d).await,
            Err(StoreError::NotFound(_))
        ));
        store.save(&d).await.unwrap();
        store.update(&d).await.unwrap();
    }

    #[tokio::test]
    async fn missing_draft_reads_as_none() {
        let store = MemoryDraftStore::new();
        assert!(store.find_by_id("drf_missing", true).await.unwrap().is_none());
        assert!(store.get_ttl("drf_missing").await.unwrap().is_none());
        assert!(!store.exists("drf_missing").await.unwrap());
        store.delete("drf_missing").await.unwrap();
    }

    #[tokio::test]
    async fn expired_draft_is_indistinguishable_from_absent() {
        let store = MemoryDraftStore::new();
        let d = draft(1);
        store.save(&d).await.unwrap();
        tokio::time::sleep(StdDuration::from_millis(1100)).await;
        assert!(store.find_by_id(&d.draft_id, false).await.unwrap().is_none());
        assert!(!store.exists(&d.draft_id).await.unwrap());
        assert!(store.get_ttl(&d.draft_id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn slide_resets_ttl_to_full() {
        let store = MemoryDraftStore::new();
        let d = draft(60);
        store.save(&d).await.unwrap();
        tokio::time::sleep(StdDuration::from_millis(1100)).await;

        let no_slide_ttl = store.get_ttl(&d.draft_id).await.unwrap().unwrap();
        assert!(no_slide_ttl < 60);

        store.find_by_id(&d.draft_id, true).await.unwrap().unwrap();
        let slid_ttl = store.get_ttl(&d.draft_id).await.unwrap().unwrap();
        assert!(slid_ttl >= 59, "slide must reset to the full TTL, got {slid_ttl}");
    }

    #[tokio::test]
    async fn plain_read_does_not_slide() {
        let store = MemoryDraftStore::new();
        let d = draft(60);
        store.save(&d).await.unwrap();
        tokio::time::sleep(StdDuration::from_millis(1100)).await;
        store.find_by_id(&d.draft_id, false).await.unwrap().unwrap();
        let ttl = store.get_ttl(&d.draft_id).await.unwrap().unwrap();
        assert!(ttl < 60, "read without slide must not refresh, got {ttl}");
    }

    #[tokio::test]
    async fn update_with_lock_applies_and_bumps() {
        let store = MemoryDraftStore::new();
        let d = draft(60);
        store.save(&d).await.unwrap();

        let updated = store
            .update_with_lock(
                &d.draft_id,
                Box::new(|draft: &mut Draft| {
                    draft.meta.notes = Some("touched".to_string());
                    draft.touch(Utc::now());
                }),
            )
            .await
            .unwrap();
        assert_eq!(updated.meta.notes.as_deref(), Some("touched"));

        let stored = store.find_by_id(&d.draft_id, false).await.unwrap().unwrap();
        assert_eq!(stored, updated);
    }

    #[tokio::test]
    async fn update_with_lock_on_absent_key() {
        let store = MemoryDraftStore::new();
        let result = store
            .update_with_lock("drf_absent", Box::new(|_d: &mut Draft| {}))
            .await;
        assert!(matches!(result, Err(StoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let store = MemoryDraftStore::new();
        let d = draft(60);
        store.save(&d).await.unwrap();
        store.delete(&d.draft_id).await.unwrap();
        store.delete(&d.draft_id).await.unwrap();
        assert!(!store.exists(&d.draft_id).await.unwrap());
    }
}
