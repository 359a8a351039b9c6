use crate::voice::VoiceSettings;

/// Text that opens a stream. The endpoint rejects an empty first message, so a single space
/// is sent alongside the voice settings.
pub const INIT_TEXT: &str = " ";
/// Text of a keep-alive ping.
pub const KEEP_ALIVE_TEXT: &str = " ";

/// First message of a stream: placeholder text plus voice settings.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct InitMessage {
    text: String,
    voice_settings: VoiceSettings,
}

impl InitMessage {
    pub fn new(voice_settings: VoiceSettings) -> Self {
        Self {
            text: INIT_TEXT.to_string(),
            voice_settings,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn voice_settings(&self) -> &VoiceSettings {
        &self.voice_settings
    }
}

/// A chunk of text to synthesize.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct TextMessage {
    text: String,
}

impl TextMessage {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Forces the endpoint to synthesize everything buffered so far.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct FlushMessage {
    text: String,
    flush: bool,
}

impl FlushMessage {
    pub fn new() -> Self {
        Self {
            text: String::new(),
            flush: true,
        }
    }
}

impl Default for FlushMessage {
    fn default() -> Self {
        Self::new()
    }
}

/// Messages sent to the `stream-input` endpoint. The wire format has no tag field, the
/// variant is told apart by the shape of the object.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum ClientMessage {
    Init(InitMessage),
    Text(TextMessage),
    Flush(FlushMessage),
}

impl ClientMessage {
    pub fn init(voice_settings: VoiceSettings) -> Self {
        Self::Init(InitMessage::new(voice_settings))
    }

    pub fn text(text: &str) -> Self {
        Self::Text(TextMessage::new(text))
    }

    pub fn keep_alive() -> Self {
        Self::Text(TextMessage::new(KEEP_ALIVE_TEXT))
    }

    pub fn flush() -> Self {
        Self::Flush(FlushMessage::new())
    }

    /// Short label used in log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Init(_) => "init",
            Self::Text(_) => "text",
            Self::Flush(_) => "flush",
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn to_value(message: &ClientMessage) -> serde_json::Value {
        serde_json::from_str(&message.to_json().unwrap()).unwrap()
    }

    #[test]
    fn init_carries_placeholder_text_and_voice_settings() {
        let settings = VoiceSettings::new()
            .with_stability(0.25)
            .with_similarity_boost(0.75)
            .with_speed(1.5);
        assert_eq!(
            to_value(&ClientMessage::init(settings)),
            json!({
                "text": " ",
                "voice_settings": {
                    "stability": 0.25,
                    "similarity_boost": 0.75,
                    "speed": 1.5
                }
            })
        );
    }

    #[test]
    fn text_is_a_bare_text_object() {
        assert_eq!(
            to_value(&ClientMessage::text("Hello there.")),
            json!({ "text": "Hello there." })
        );
        assert_eq!(to_value(&ClientMessage::keep_alive()), json!({ "text": " " }));
    }

    #[test]
    fn flush_sends_empty_text_with_flag() {
        assert_eq!(
            to_value(&ClientMessage::flush()),
            json!({ "text": "", "flush": true })
        );
    }
}
