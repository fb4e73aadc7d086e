//! In-memory answer store.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{AnswerStore, DenormalizedAnswer, Result, StoreError};

/// In-memory answer store implementation.
///
/// Keeps records in a Vec in insertion order and provides the same
/// interface as the PostgreSQL implementation. Used in tests and as the
/// default wiring when no storage connection string is configured.
#[derive(Clone, Default)]
pub struct InMemoryAnswerStore {
    answers: Arc<RwLock<Vec<DenormalizedAnswer>>>,
}

impl InMemoryAnswerStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the total number of stored answers.
    pub async fn count(&self) -> usize {
        self.answers.read().await.len()
    }

    /// Removes all stored answers.
    pub async fn clear(&self) {
        self.answers.write().await.clear();
    }
}

#[async_trait]
impl AnswerStore for InMemoryAnswerStore {
    async fn insert(&self, answer: DenormalizedAnswer) -> Result<()> {
        let mut answers = self.answers.write().await;
        if answers.iter().any(|a| a.id == answer.id) {
            return Err(StoreError::DuplicateKey(answer.id));
        }
        answers.push(answer);
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<DenormalizedAnswer>> {
        Ok(self.answers.read().await.iter().find(|a| a.id == id).cloned())
    }

    async fn list(&self, limit: usize) -> Result<Vec<DenormalizedAnswer>> {
        Ok(self.answers.read().await.iter().take(limit).cloned().collect())
    }
}
