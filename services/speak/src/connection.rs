use async_trait::async_trait;
use elevenlabs_stream::types::ClientMessage;
use elevenlabs_stream::{AudioBuffer, Client, ClientError, Config, MessageSink};
use std::sync::Arc;

/// Opens a fresh streaming connection for each segment.
#[async_trait]
pub trait Connector: Send + Sync {
    type Connection: SpeechConnection;

    async fn connect(&self) -> Result<Self::Connection, ClientError>;
}

/// The operations the driver needs from an open stream.
#[async_trait]
pub trait SpeechConnection: Send + Sync {
    /// Shared handle used by the keep-alive task.
    fn sink(&self) -> Arc<dyn MessageSink>;

    async fn send(&self, message: &ClientMessage) -> Result<(), ClientError>;

    async fn receive_audio(&mut self) -> Result<AudioBuffer, ClientError>;

    /// Must tolerate being called on an already closed connection.
    async fn close(&mut self);
}

/// Connects to the ElevenLabs `stream-input` endpoint.
pub struct ElevenLabsConnector {
    config: Config,
}

impl ElevenLabsConnector {
    pub fn new(config: Config) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Connector for ElevenLabsConnector {
    type Connection = Client;

    async fn connect(&self) -> Result<Client, ClientError> {
        elevenlabs_stream::connect(&self.config).await
    }
}

#[async_trait]
impl SpeechConnection for Client {
    fn sink(&self) -> Arc<dyn MessageSink> {
        Client::sink(self)
    }

    async fn send(&self, message: &ClientMessage) -> Result<(), ClientError> {
        Client::send(self, message).await
    }

    async fn receive_audio(&mut self) -> Result<AudioBuffer, ClientError> {
        Client::receive_audio(self).await
    }

    async fn close(&mut self) {
        Client::close(self).await
    }
}
