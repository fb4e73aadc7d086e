//! Dead-letter capture for dropped messages.
//!
//! The pipeline never blocks on a bad message; instead each drop is
//! published to a [`DeadLetterSink`] so failures stay observable and
//! recoverable by operators.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::ProjectError;

/// A message the projector gave up on, with the reason it was dropped.
#[derive(Debug, Clone)]
pub struct DeadLetter {
    pub id: Uuid,
    /// Stable failure-kind label, see [`ProjectError::kind`].
    pub kind: &'static str,
    pub reason: String,
    /// The raw broker message as delivered.
    pub payload: Vec<u8>,
    pub failed_at: DateTime<Utc>,
}

impl DeadLetter {
    /// Captures a dropped message and the error that killed it.
    pub fn new(payload: &[u8], error: &ProjectError) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind: error.kind(),
            reason: error.to_string(),
            payload: payload.to_vec(),
            failed_at: Utc::now(),
        }
    }
}

/// Destination for messages the pipeline drops.
#[async_trait]
pub trait DeadLetterSink: Send + Sync {
    /// Records a dropped message. Must not fail; a sink that cannot
    /// persist the letter should log and discard it.
    async fn publish(&self, letter: DeadLetter);
}

/// Sink that only logs, matching the historic log-and-drop behavior.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogDeadLetterSink;

#[async_trait]
impl DeadLetterSink for LogDeadLetterSink {
    async fn publish(&self, letter: DeadLetter) {
        tracing::warn!(
            id = %letter.id,
            kind = letter.kind,
            reason = %letter.reason,
            bytes = letter.payload.len(),
            "message dead-lettered"
        );
    }
}

/// Sink that retains letters in memory for inspection.
#[derive(Clone, Default)]
pub struct InMemoryDeadLetterSink {
    letters: Arc<RwLock<Vec<DeadLetter>>>,
}

impl InMemoryDeadLetterSink {
    /// Creates a new empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of captured letters.
    pub async fn count(&self) -> usize {
        self.letters.read().await.len()
    }

    /// Returns a copy of all captured letters.
    pub async fn letters(&self) -> Vec<DeadLetter> {
        self.letters.read().await.clone()
    }
}

#[async_trait]
impl DeadLetterSink for InMemoryDeadLetterSink {
    async fn publish(&self, letter: DeadLetter) {
        self.letters.write().await.push(letter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn captures_kind_reason_and_payload() {
        let error = ProjectError::MalformedEnvelope(envelope::EnvelopeError::Truncated(1));
        let letter = DeadLetter::new(b"x", &error);
        assert_eq!(letter.kind, "malformed_envelope");
        assert_eq!(letter.payload, b"x");
        assert!(letter.reason.contains("length prefix"));

        let sink = InMemoryDeadLetterSink::new();
        sink.publish(letter).await;
        assert_eq!(sink.count().await, 1);
        assert_eq!(sink.letters().await[0].kind, "malformed_envelope");
    }
}
