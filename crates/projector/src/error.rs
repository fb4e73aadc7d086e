//! Projection error taxonomy.
//!
//! Every variant is terminal for the message that caused it: the
//! processor logs it, publishes a dead letter, and moves on. Nothing
//! here propagates back to the broker.

use thiserror::Error;

use crate::enrichment::EnrichmentError;

/// Errors arising while projecting a single broker message.
#[derive(Debug, Error)]
pub enum ProjectError {
    /// The wire prefix could not be parsed or ran past the buffer.
    #[error("malformed envelope: {0}")]
    MalformedEnvelope(#[from] envelope::EnvelopeError),

    /// The event body does not match the expected structure.
    #[error("cannot decode event body: {0}")]
    DecodeFailed(#[from] serde_json::Error),

    /// The enrichment lookup failed (transport, status, or profile decode).
    #[error(transparent)]
    Enrichment(#[from] EnrichmentError),

    /// The store rejected the insert, including duplicate keys.
    #[error("cannot store answer: {0}")]
    StoreFailed(#[from] read_store::StoreError),
}

impl ProjectError {
    /// Stable failure-kind label used in logs, metrics, and dead letters.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MalformedEnvelope(_) => "malformed_envelope",
            Self::DecodeFailed(_) => "decode_failed",
            Self::Enrichment(EnrichmentError::LookupFailed { .. }) => "lookup_failed",
            Self::Enrichment(EnrichmentError::DecodeFailed { .. }) => "decode_failed",
            Self::StoreFailed(_) => "store_failed",
        }
    }
}

/// Result type for projection operations.
pub type Result<T> = std::result::Result<T, ProjectError>;
