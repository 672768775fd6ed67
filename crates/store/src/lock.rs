//! The distributed commit lock contract and its in-process backend.
//!
//! The lock is an optimization: it keeps concurrent commits from doing
//! wasted work. Correctness rests on the relational unique constraint, so
//! lock expiry or a lost lock is never a safety problem.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use sitesmith_core::types::Timestamp;
use tokio::sync::RwLock;

use crate::error::StoreError;

/// TTL-bounded mutual exclusion on `lock:commit:{draftId}`.
#[async_trait]
pub trait CommitLock: Send + Sync {
    /// Set-if-absent with TTL. Returns `false` when the lock is held.
    async fn acquire(&self, draft_id: &str, ttl_seconds: i64) -> Result<bool, StoreError>;

    /// Drop the lock. Idempotent; releasing an expired or foreign lock is
    /// a no-op.
    async fn release(&self, draft_id: &str) -> Result<(), StoreError>;
}

/// The `memory://` lock backend.
#[derive(Default)]
pub struct MemoryCommitLock {
    held: RwLock<HashMap<String, Timestamp>>,
}

impl MemoryCommitLock {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(draft_id: &str) -> String {
        format!("lock:commit:{draft_id}")
    }
}

#[async_trait]
impl CommitLock for MemoryCommitLock {
    async fn acquire(&self, draft_id: &str, ttl_seconds: i64) -> Result<bool, StoreError> {
        let now = Utc::now();
        let key = Self::key(draft_id);
        let mut held = self.held.write().await;
        if held.get(&key).is_some_and(|expires| *expires > now) {
            return Ok(false);
        }
        held.insert(key, now + Duration::seconds(ttl_seconds));
        Ok(true)
    }

    async fn release(&self, draft_id: &str) -> Result<(), StoreError> {
        self.held.write().await.remove(&Self::key(draft_id));
        Ok(())
    }
}
