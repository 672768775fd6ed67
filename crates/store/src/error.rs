use thiserror::Error;

/// Errors from the ephemeral storage layer.
#[derive(Debug, Error)]
pub enum StoreError {
    /// `save` on a key that already holds a live record.
    #[error("Key already exists: {0}")]
    AlreadyExists(String),

    /// `update` / `update_with_lock` on an absent (or expired) key.
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Compare-and-set lost the race on every attempt.
    #[error("Concurrent update conflict on {0}")]
    Conflict(String),

    /// A stored blob failed to (de)serialize. Corrupt records are deleted
    /// on read and surface as absent, so this only reaches callers on the
    /// write path.
    #[error("Serialization failed: {0}")]
    Serialization(String),

    /// Backend transport failure (networked implementations).
    #[error("Store backend error: {0}")]
    Backend(String),
}
