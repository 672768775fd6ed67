use thiserror::Error;

/// Domain error kinds, independent of transport.
///
/// Each variant maps to exactly one HTTP status family at the API boundary;
/// the core signals the kind and the boundary decides the wire shape.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Draft not found: {0}")]
    DraftNotFound(String),

    #[error("Asset not found: {0}")]
    AssetNotFound(String),

    #[error("Draft expired: {0}")]
    DraftExpired(String),

    #[error("Commit already in progress for draft {0}")]
    CommitInProgress(String),

    #[error("Unsafe content rejected: {0}")]
    PreviewUnsafe(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
