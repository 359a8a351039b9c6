use elevenlabs_stream_types::audio::AudioDecodeError;
use tokio_tungstenite::tungstenite;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("failed to build request: {0}")]
    Request(#[source] tungstenite::Error),
    #[error("WebSocket dial error: {0}")]
    Connect(#[source] tungstenite::Error),
    #[error("failed to serialize {kind} message: {source}")]
    Serialize {
        kind: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("{kind} send error: {reason}")]
    Send { kind: &'static str, reason: String },
    #[error("read error: {0}")]
    Read(#[source] tungstenite::Error),
    #[error("connection closed abnormally: {0}")]
    AbnormalClose(String),
    #[error("decode error: {0}")]
    Decode(#[from] AudioDecodeError),
}
