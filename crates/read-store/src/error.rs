//! Store error types.

use thiserror::Error;

/// Errors that can occur when interacting with the answer store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// An answer with the same identifier already exists.
    ///
    /// Duplicate broker deliveries end up here; the projector drops them.
    #[error("answer {0} already exists")]
    DuplicateKey(String),

    /// A database error occurred.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
