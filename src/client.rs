use crate::client::audio::AudioBuffer;
use crate::client::config::Config;
use crate::client::consts::MAX_INACTIVITY_TIMEOUT;
use crate::client::error::ClientError;
use crate::client::sink::{MessageSink, SharedWriter};
use crate::types::ClientMessage;
use futures_util::stream::{SplitSink, SplitStream};
use futures_util::StreamExt;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};

pub(crate) mod audio;
pub(crate) mod config;
pub mod consts;
pub(crate) mod error;
pub(crate) mod keep_alive;
pub(crate) mod receive;
pub(crate) mod sink;
mod utils;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;
type WsWriter = SplitSink<WsStream, Message>;
type WsReader = SplitStream<WsStream>;

/// One open `stream-input` connection.
///
/// Outbound messages go through a shared, locked writer (see [`Client::sink`]) so a
/// keep-alive task can ping the same connection.
pub struct Client {
    writer: SharedWriter<WsWriter>,
    reader: WsReader,
    read_timeout: Duration,
    closed: bool,
}

impl Client {
    /// A handle for sending on this connection from another task.
    pub fn sink(&self) -> Arc<dyn MessageSink> {
        Arc::new(self.writer.clone())
    }

    pub async fn send(&self, message: &ClientMessage) -> Result<(), ClientError> {
        self.writer.send(message).await
    }

    /// Collects audio until the stream ends. See [`crate::receive_audio`].
    pub async fn receive_audio(&mut self) -> Result<AudioBuffer, ClientError> {
        receive::receive_audio(&mut self.reader, self.read_timeout).await
    }

    /// Closes the connection. Safe to call more than once.
    pub async fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        // The peer may already have closed the socket.
        if let Err(e) = self.writer.close().await {
            tracing::debug!("close: {}", e);
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

/// Opens a stream for the configured voice and model.
pub async fn connect(config: &Config) -> Result<Client, ClientError> {
    if config.inactivity_timeout() > MAX_INACTIVITY_TIMEOUT {
        tracing::warn!(
            "inactivity timeout {}s is above the {}s maximum and may be rejected",
            config.inactivity_timeout(),
            MAX_INACTIVITY_TIMEOUT
        );
    }

    let request = utils::build_request(config).map_err(ClientError::Request)?;
    tracing::info!("Dialing WebSocket: {}", request.uri());

    let (ws_stream, _) = tokio_tungstenite::connect_async(request)
        .await
        .map_err(ClientError::Connect)?;
    tracing::info!("WebSocket connected");

    let (write, read) = ws_stream.split();
    Ok(Client {
        writer: SharedWriter::new(write),
        reader: read,
        read_timeout: config.read_timeout(),
        closed: false,
    })
}
