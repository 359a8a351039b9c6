use crate::client::consts::{BASE_URL, DEFAULT_INACTIVITY_TIMEOUT, DEFAULT_MODEL, READ_TIMEOUT};
use secrecy::SecretString;
use std::time::Duration;

/// Connection settings for one `stream-input` websocket.
#[derive(Debug)]
pub struct Config {
    base_url: String,
    api_key: SecretString,
    voice_id: String,
    model_id: String,
    inactivity_timeout: u64,
    read_timeout: Duration,
}

pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: Config::new(),
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.config.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_api_key(mut self, api_key: &str) -> Self {
        self.config.api_key = SecretString::from(api_key.to_string());
        self
    }

    pub fn with_voice_id(mut self, voice_id: &str) -> Self {
        self.config.voice_id = voice_id.to_string();
        self
    }

    pub fn with_model_id(mut self, model_id: &str) -> Self {
        self.config.model_id = model_id.to_string();
        self
    }

    /// Seconds of inactivity before the endpoint drops the stream. Values above
    /// [`MAX_INACTIVITY_TIMEOUT`](crate::consts::MAX_INACTIVITY_TIMEOUT) are passed through
    /// unchanged and may be rejected remotely.
    pub fn with_inactivity_timeout(mut self, seconds: u64) -> Self {
        self.config.inactivity_timeout = seconds;
        self
    }

    pub fn with_read_timeout(mut self, read_timeout: Duration) -> Self {
        self.config.read_timeout = read_timeout;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    // Sets the default values. The API key starts empty and must be supplied by the caller.
    pub fn new() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            api_key: SecretString::from(String::new()),
            voice_id: String::new(),
            model_id: DEFAULT_MODEL.to_string(),
            inactivity_timeout: DEFAULT_INACTIVITY_TIMEOUT,
            read_timeout: READ_TIMEOUT,
        }
    }

    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn api_key(&self) -> &SecretString {
        &self.api_key
    }

    pub fn voice_id(&self) -> &str {
        &self.voice_id
    }

    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    pub fn inactivity_timeout(&self) -> u64 {
        self.inactivity_timeout
    }

    pub fn read_timeout(&self) -> Duration {
        self.read_timeout
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn builder_overrides_defaults() {
        let config = Config::builder()
            .with_base_url("ws://127.0.0.1:9000/v1/")
            .with_api_key("secret")
            .with_voice_id("voice-123")
            .with_model_id("eleven_multilingual_v2")
            .with_inactivity_timeout(300)
            .with_read_timeout(Duration::from_millis(250))
            .build();

        assert_eq!(config.base_url(), "ws://127.0.0.1:9000/v1");
        assert_eq!(config.api_key().expose_secret(), "secret");
        assert_eq!(config.voice_id(), "voice-123");
        assert_eq!(config.model_id(), "eleven_multilingual_v2");
        // Above the documented ceiling, still kept as given.
        assert_eq!(config.inactivity_timeout(), 300);
        assert_eq!(config.read_timeout(), Duration::from_millis(250));
    }

    #[test]
    fn api_key_defaults_to_empty() {
        let config = Config::new();
        assert_eq!(config.api_key().expose_secret(), "");
        assert_eq!(config.voice_id(), "");
    }

    #[test]
    fn defaults_match_the_public_endpoint() {
        let config = Config::builder().with_api_key("k").build();
        assert_eq!(config.base_url(), BASE_URL);
        assert_eq!(config.model_id(), DEFAULT_MODEL);
        assert_eq!(config.inactivity_timeout(), DEFAULT_INACTIVITY_TIMEOUT);
        assert_eq!(config.read_timeout(), READ_TIMEOUT);
    }
}
