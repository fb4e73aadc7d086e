//! Core trait for answer store backends.

use async_trait::async_trait;

use crate::{DenormalizedAnswer, Result};

/// Storage backend for denormalized answers.
///
/// Implementations must be safe for concurrent use: the projector inserts
/// from the message-consumption loop while the query API reads from
/// request handlers. No update or delete is exposed.
#[async_trait]
pub trait AnswerStore: Send + Sync {
    /// Persists a new answer.
    ///
    /// Fails with [`StoreError::DuplicateKey`] when a record with the same
    /// id already exists.
    ///
    /// [`StoreError::DuplicateKey`]: crate::StoreError::DuplicateKey
    async fn insert(&self, answer: DenormalizedAnswer) -> Result<()>;

    /// Looks up a single answer by id.
    async fn get(&self, id: &str) -> Result<Option<DenormalizedAnswer>>;

    /// Returns up to `limit` answers in insertion order.
    async fn list(&self, limit: usize) -> Result<Vec<DenormalizedAnswer>>;
}
