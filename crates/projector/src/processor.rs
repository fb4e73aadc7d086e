//! Sequential message-processing loop.

use std::sync::Arc;

use futures_util::StreamExt;

use crate::dead_letter::{DeadLetter, DeadLetterSink};
use crate::projector::{Projected, Projector};
use crate::source::{MessageSource, MessageStream, SourceError};

/// Drives the projector over a message stream, one message at a time.
///
/// Messages are processed strictly sequentially — a single in-flight
/// projection. Failures are terminal per message: logged, counted,
/// dead-lettered, and never surfaced to the source, so a redelivering
/// broker sees every message as consumed.
pub struct MessageProcessor {
    projector: Projector,
    dead_letters: Arc<dyn DeadLetterSink>,
}

impl MessageProcessor {
    /// Creates a processor over the given projector and dead-letter sink.
    pub fn new(projector: Projector, dead_letters: Arc<dyn DeadLetterSink>) -> Self {
        Self {
            projector,
            dead_letters,
        }
    }

    /// Subscribes to the source and consumes it until the stream ends.
    pub async fn consume(&self, source: &dyn MessageSource) -> Result<(), SourceError> {
        tracing::info!(topic = source.topic(), "starting message consumption");
        let stream = source.subscribe().await?;
        self.run(stream).await;
        Ok(())
    }

    /// Consumes an already-subscribed stream until it ends.
    pub async fn run(&self, mut messages: MessageStream) {
        while let Some(message) = messages.next().await {
            self.process(&message).await;
        }
        tracing::info!("message stream closed, stopping");
    }

    /// Projects a single message, absorbing any failure.
    #[tracing::instrument(skip(self, message), fields(bytes = message.len()))]
    pub async fn process(&self, message: &[u8]) {
        match self.projector.project(message).await {
            Ok(Projected::Stored { id }) => {
                metrics::counter!("projector_answers_stored").increment(1);
                tracing::debug!(%id, "answer projected");
            }
            Ok(Projected::Ignored { event_type }) => {
                metrics::counter!("projector_messages_ignored").increment(1);
                tracing::info!(%event_type, "ignored message with unrecognized event type");
            }
            Err(error) => {
                metrics::counter!("projector_messages_dead_lettered", "kind" => error.kind())
                    .increment(1);
                tracing::warn!(kind = error.kind(), %error, "dropping message");
                self.dead_letters
                    .publish(DeadLetter::new(message, &error))
                    .await;
            }
        }
    }
}
