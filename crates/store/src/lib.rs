//! Ephemeral storage contracts and the in-process backends.
//!
//! Three seams live here, all async traits consumed by the API layer:
//!
//! - [`DraftStore`] -- the TTL key-value store holding drafts
//!   (`draft:{draftId}`), with the atomic primitives the lifecycle needs:
//!   set-if-absent, set-if-present, compare-and-set.
//! - [`CommitLock`] -- the TTL-bounded mutex on `lock:commit:{draftId}`.
//! - [`AssetMetadataStore`] -- the blob-metadata adapter; the service only
//!   ever reads logo metadata, never the blob.
//!
//! The shipped backends are in-process (`memory://`); a networked KV store
//! implements the same traits without touching the domain layer.

mod assets;
mod draft_store;
mod error;
mod lock;
mod memory;

pub use assets::{AssetMetadataStore, HttpAssetMetadataStore, MemoryAssetStore};
pub use draft_store::{DraftStore, DraftTransform, MAX_CAS_ATTEMPTS};
pub use error::StoreError;
pub use lock::{CommitLock, MemoryCommitLock};
pub use memory::MemoryDraftStore;
