use crate::client::audio::AudioBuffer;
use crate::client::error::ClientError;
use crate::types::ServerMessage;
use futures_util::{Stream, StreamExt};
use std::time::Duration;
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;
use tokio_tungstenite::tungstenite::{Error as WsError, Message};

/// Reads from `read` until the stream ends and returns the decoded audio, in arrival order.
///
/// The stream ends without error when a read takes longer than `read_timeout`, when the peer
/// closes with 1000 (normal closure), or when a message carries a final indicator (see
/// [`ServerMessage::is_final`]). Payloads that are not JSON are skipped. Any other read
/// failure, a non-normal close and undecodable audio are errors.
pub async fn receive_audio<R>(read: &mut R, read_timeout: Duration) -> Result<AudioBuffer, ClientError>
where
    R: Stream<Item = Result<Message, WsError>> + Unpin,
{
    let mut audio = AudioBuffer::new();
    tracing::info!("← awaiting audio…");

    loop {
        let message = match tokio::time::timeout(read_timeout, read.next()).await {
            Err(_) => {
                tracing::info!("← read timeout, end of stream");
                break;
            }
            Ok(None) => {
                tracing::info!("← connection closed, end of stream");
                break;
            }
            Ok(Some(Err(e))) => return Err(ClientError::Read(e)),
            Ok(Some(Ok(message))) => message,
        };

        let parsed = match message {
            Message::Text(text) => ServerMessage::from_json(&text),
            Message::Binary(bin) => ServerMessage::from_slice(&bin),
            Message::Close(Some(frame)) if frame.code == CloseCode::Normal => {
                tracing::info!("← normal close (1000), end of stream");
                break;
            }
            Message::Close(frame) => {
                let reason = frame
                    .map(|frame| frame.to_string())
                    .unwrap_or_else(|| "no status received".to_string());
                return Err(ClientError::AbnormalClose(reason));
            }
            // Ping/Pong are answered by tungstenite itself.
            _ => continue,
        };

        let parsed = match parsed {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("skip malformed JSON: {}", e);
                continue;
            }
        };

        if let Some(chunk) = parsed.decode_audio()? {
            tracing::info!("← got chunk ({} chars)", parsed.audio().map_or(0, str::len));
            audio.append(&chunk);
            tracing::debug!("    buffered {} bytes", audio.len());
        }

        if parsed.is_final() {
            tracing::info!("← final, end of stream");
            break;
        }
    }

    Ok(audio)
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::stream;
    use tokio_tungstenite::tungstenite::protocol::CloseFrame;

    const DEADLINE: Duration = Duration::from_millis(30);

    fn text(payload: &str) -> Result<Message, WsError> {
        Ok(Message::Text(payload.to_string()))
    }

    // Yields `items`, then goes silent so the read deadline kicks in.
    fn then_silence(
        items: Vec<Result<Message, WsError>>,
    ) -> impl Stream<Item = Result<Message, WsError>> + Unpin {
        stream::iter(items).chain(stream::pending())
    }

    #[tokio::test]
    async fn concatenates_chunks_until_final() {
        let mut read = then_silence(vec![
            text(r#"{"audio":"SUQz"}"#),
            text(r#"{"audio":"","alignment":null}"#),
            text(r#"{"audio":"BAUG","final":true}"#),
            text(r#"{"audio":"/w=="}"#),
        ]);

        let audio = receive_audio(&mut read, DEADLINE).await.unwrap();
        assert_eq!(audio.as_bytes(), b"ID3\x04\x05\x06");
    }

    #[tokio::test]
    async fn final_false_keeps_reading() {
        let mut read = then_silence(vec![
            text(r#"{"audio":"SUQz","final":false}"#),
            text(r#"{"audio":"BAUG"}"#),
        ]);

        let audio = receive_audio(&mut read, DEADLINE).await.unwrap();
        assert_eq!(audio.as_bytes(), b"ID3\x04\x05\x06");
    }

    #[tokio::test]
    async fn non_boolean_final_ends_the_stream() {
        let mut read = then_silence(vec![
            text(r#"{"audio":"SUQz"}"#),
            text(r#"{"final":{"reason":"end"}}"#),
            text(r#"{"audio":"BAUG"}"#),
        ]);

        let audio = receive_audio(&mut read, DEADLINE).await.unwrap();
        assert_eq!(audio.as_bytes(), b"ID3");
    }

    #[tokio::test]
    async fn final_with_non_string_audio_ends_the_stream() {
        let mut read = then_silence(vec![
            text(r#"{"audio":"SUQz"}"#),
            text(r#"{"audio":123,"final":true}"#),
            text(r#"{"audio":"BAUG"}"#),
        ]);

        let audio = receive_audio(&mut read, DEADLINE).await.unwrap();
        assert_eq!(audio.as_bytes(), b"ID3");
    }

    #[tokio::test]
    async fn silence_is_a_graceful_end() {
        let mut read = then_silence(vec![]);
        let audio = receive_audio(&mut read, DEADLINE).await.unwrap();
        assert!(audio.is_empty());
    }

    #[tokio::test]
    async fn malformed_payloads_are_skipped() {
        let mut read = then_silence(vec![
            text("this is not json"),
            Ok(Message::Binary(br#"{"audio":"SUQz"}"#.to_vec())),
            Ok(Message::Ping(vec![1, 2])),
            text(r#"{"audio":"BAUG"}"#),
        ]);

        let audio = receive_audio(&mut read, DEADLINE).await.unwrap();
        assert_eq!(audio.as_bytes(), b"ID3\x04\x05\x06");
    }

    #[tokio::test]
    async fn normal_close_ends_the_stream() {
        let mut read = then_silence(vec![
            text(r#"{"audio":"SUQz"}"#),
            Ok(Message::Close(Some(CloseFrame {
                code: CloseCode::Normal,
                reason: "".into(),
            }))),
            text(r#"{"audio":"BAUG"}"#),
        ]);

        let audio = receive_audio(&mut read, DEADLINE).await.unwrap();
        assert_eq!(audio.as_bytes(), b"ID3");
    }

    #[tokio::test]
    async fn end_of_stream_ends_the_loop() {
        let mut read = stream::iter(vec![text(r#"{"audio":"SUQz"}"#)]);
        let audio = receive_audio(&mut read, DEADLINE).await.unwrap();
        assert_eq!(audio.as_bytes(), b"ID3");
    }

    #[tokio::test]
    async fn abnormal_close_is_an_error() {
        let mut read = then_silence(vec![Ok(Message::Close(Some(CloseFrame {
            code: CloseCode::Policy,
            reason: "input timeout exceeded".into(),
        })))]);

        let err = receive_audio(&mut read, DEADLINE).await.unwrap_err();
        assert!(matches!(err, ClientError::AbnormalClose(_)));
    }

    #[tokio::test]
    async fn read_failure_is_an_error() {
        let mut read = then_silence(vec![
            text(r#"{"audio":"SUQz"}"#),
            Err(WsError::ConnectionClosed),
        ]);

        let err = receive_audio(&mut read, DEADLINE).await.unwrap_err();
        assert!(matches!(err, ClientError::Read(_)));
    }

    #[tokio::test]
    async fn undecodable_audio_is_an_error() {
        let mut read = then_silence(vec![text(r#"{"audio":"%%%"}"#)]);

        let err = receive_audio(&mut read, DEADLINE).await.unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));
    }
}
