//! Message source abstraction over the broker.

use std::pin::Pin;

use async_trait::async_trait;
use futures_core::Stream;
use thiserror::Error;
use tokio::sync::{Mutex, mpsc};

/// A stream of raw broker messages.
pub type MessageStream = Pin<Box<dyn Stream<Item = Vec<u8>> + Send>>;

/// Errors from subscribing to a message source.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The source's single subscription has already been taken.
    #[error("topic {0} is already subscribed")]
    AlreadySubscribed(String),
}

/// A subscription to one broker topic.
///
/// The broker client lives behind this seam; the processing loop only
/// sees an ordered stream of raw messages. Implementations deliver each
/// message at most once to the single subscriber.
#[async_trait]
pub trait MessageSource: Send + Sync {
    /// Topic this source delivers messages from.
    fn topic(&self) -> &str;

    /// Takes the message stream. A source supports one subscriber.
    async fn subscribe(&self) -> Result<MessageStream, SourceError>;
}

/// Creates an in-process source and the sender that feeds it.
pub fn channel(topic: &str, capacity: usize) -> (mpsc::Sender<Vec<u8>>, ChannelSource) {
    let (tx, rx) = mpsc::channel(capacity);
    (
        tx,
        ChannelSource {
            topic: topic.to_string(),
            receiver: Mutex::new(Some(rx)),
        },
    )
}

/// In-process message source over a bounded mpsc channel.
///
/// Preserves FIFO order and backpressures the producer when the
/// consumer falls behind. The stream ends when the sender is dropped.
pub struct ChannelSource {
    topic: String,
    receiver: Mutex<Option<mpsc::Receiver<Vec<u8>>>>,
}

#[async_trait]
impl MessageSource for ChannelSource {
    fn topic(&self) -> &str {
        &self.topic
    }

    async fn subscribe(&self) -> Result<MessageStream, SourceError> {
        let receiver = self
            .receiver
            .lock()
            .await
            .take()
            .ok_or_else(|| SourceError::AlreadySubscribed(self.topic.clone()))?;

        Ok(Box::pin(futures_util::stream::unfold(
            receiver,
            |mut receiver| async move { receiver.recv().await.map(|msg| (msg, receiver)) },
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::StreamExt;

    #[tokio::test]
    async fn delivers_messages_in_order() {
        let (tx, source) = channel("answers", 8);
        tx.send(b"first".to_vec()).await.unwrap();
        tx.send(b"second".to_vec()).await.unwrap();
        drop(tx);

        let mut stream = source.subscribe().await.unwrap();
        assert_eq!(stream.next().await.unwrap(), b"first");
        assert_eq!(stream.next().await.unwrap(), b"second");
        assert!(stream.next().await.is_none());
    }

    #[tokio::test]
    async fn second_subscribe_fails() {
        let (_tx, source) = channel("answers", 8);
        let _stream = source.subscribe().await.unwrap();

        let err = source.subscribe().await.err().unwrap();
        assert!(matches!(err, SourceError::AlreadySubscribed(ref t) if t == "answers"));
    }

    #[tokio::test]
    async fn topic_is_exposed() {
        let (_tx, source) = channel("answers", 1);
        assert_eq!(source.topic(), "answers");
    }
}
