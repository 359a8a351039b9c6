use crate::client::error::ClientError;
use crate::types::ClientMessage;
use async_trait::async_trait;
use futures_util::{Sink, SinkExt};
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio_tungstenite::tungstenite::Message;

/// Anything that can put a [`ClientMessage`] on the wire.
///
/// The session driver and the keep-alive task both hold one of these for the same
/// connection.
#[async_trait]
pub trait MessageSink: Send + Sync {
    async fn send(&self, message: &ClientMessage) -> Result<(), ClientError>;
}

/// The write half of a websocket behind a mutex, so writes from different tasks never
/// interleave.
pub struct SharedWriter<S> {
    inner: Arc<Mutex<S>>,
}

impl<S> Clone for SharedWriter<S> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<S> SharedWriter<S>
where
    S: Sink<Message> + Unpin + Send,
{
    pub fn new(sink: S) -> Self {
        Self {
            inner: Arc::new(Mutex::new(sink)),
        }
    }

    /// Flushes and closes the underlying sink.
    pub async fn close(&self) -> Result<(), S::Error> {
        self.inner.lock().await.close().await
    }
}

#[async_trait]
impl<S> MessageSink for SharedWriter<S>
where
    S: Sink<Message> + Unpin + Send,
    S::Error: std::fmt::Display + Send,
{
    async fn send(&self, message: &ClientMessage) -> Result<(), ClientError> {
        let text = message.to_json().map_err(|source| ClientError::Serialize {
            kind: message.kind(),
            source,
        })?;
        let mut writer = self.inner.lock().await;
        writer
            .send(Message::Text(text))
            .await
            .map_err(|e| ClientError::Send {
                kind: message.kind(),
                reason: e.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::channel::mpsc;
    use futures::StreamExt;

    #[tokio::test]
    async fn sends_json_text_frames() {
        let (tx, mut rx) = mpsc::unbounded::<Message>();
        let writer = SharedWriter::new(tx);

        writer.send(&ClientMessage::text("hello")).await.unwrap();
        writer.send(&ClientMessage::flush()).await.unwrap();

        assert_eq!(
            rx.next().await,
            Some(Message::Text(r#"{"text":"hello"}"#.to_string()))
        );
        assert_eq!(
            rx.next().await,
            Some(Message::Text(r#"{"text":"","flush":true}"#.to_string()))
        );
    }

    #[tokio::test]
    async fn send_on_closed_sink_is_an_error() {
        let (tx, rx) = mpsc::unbounded::<Message>();
        drop(rx);
        let writer = SharedWriter::new(tx);

        let err = writer.send(&ClientMessage::text("hello")).await.unwrap_err();
        assert!(matches!(err, ClientError::Send { kind: "text", .. }));
    }
}
