use crate::audio::{self, AudioDecodeError, Base64EncodedAudioBytes};
use serde::{Deserialize, Deserializer};

/// A message received from the `stream-input` endpoint.
///
/// Only the fields the client acts on are modelled; anything else in the payload
/// (alignment data and so on) is ignored.
#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize)]
pub struct ServerMessage {
    /// Only a string counts as audio; any other value is treated as absent.
    #[serde(default, deserialize_with = "string_only")]
    audio: Option<Base64EncodedAudioBytes>,

    /// Raw `final` value. `Some(Value::Null)` means the key was present with a `null` value,
    /// which is different from the key being absent.
    #[serde(default, rename = "final", deserialize_with = "present")]
    final_indicator: Option<serde_json::Value>,
}

// Keeps an explicit `null` as `Some(Value::Null)` instead of collapsing it to `None`.
fn present<'de, D>(deserializer: D) -> Result<Option<serde_json::Value>, D::Error>
where
    D: Deserializer<'de>,
{
    serde_json::Value::deserialize(deserializer).map(Some)
}

fn string_only<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(audio) => Ok(Some(audio)),
        _ => Ok(None),
    }
}

impl ServerMessage {
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    pub fn from_slice(bytes: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(bytes)
    }

    /// The base64 audio chunk, if present and non-empty.
    pub fn audio(&self) -> Option<&str> {
        self.audio.as_deref().filter(|audio| !audio.is_empty())
    }

    pub fn final_indicator(&self) -> Option<&serde_json::Value> {
        self.final_indicator.as_ref()
    }

    /// Decodes the audio chunk. Returns `Ok(None)` when the message carries no audio.
    pub fn decode_audio(&self) -> Result<Option<Vec<u8>>, AudioDecodeError> {
        self.audio().map(audio::decode).transpose()
    }

    /// Whether this message ends the stream.
    ///
    /// A boolean `true` ends it. Failing that, any present value other than the boolean
    /// `false` also ends it (objects, strings, numbers and `null` included).
    pub fn is_final(&self) -> bool {
        if let Some(serde_json::Value::Bool(true)) = self.final_indicator {
            return true;
        }
        if let Some(value) = &self.final_indicator {
            if *value != serde_json::Value::Bool(false) {
                return true;
            }
        }
        false
    }
}
