//! Application Configuration Module
//!
//! Flags are parsed once at startup into an immutable [`AppConfig`] that is handed to the
//! driver. Nothing here is read again later.

use clap::Parser;
use elevenlabs_stream::consts::{
    BASE_URL, DEFAULT_INACTIVITY_TIMEOUT, DEFAULT_MODEL, ELEVENLABS_API_KEY, KEEP_ALIVE_INTERVAL,
};
use elevenlabs_stream::types::voice::{DEFAULT_SIMILARITY_BOOST, DEFAULT_SPEED, DEFAULT_STABILITY};
use elevenlabs_stream::types::VoiceSettings;
use elevenlabs_stream::Config;
use std::path::PathBuf;
use std::time::Duration;
use tracing::Level;

/// File the synthesized audio is written to, overwritten on every segment.
pub const DEFAULT_OUTPUT: &str = "output.mp3";
/// Player invoked with the output file as its only argument.
pub const DEFAULT_PLAYER: &str = "afplay";

#[derive(Debug, Parser)]
#[command(
    name = "speak",
    version,
    about = "Stream typed lines to ElevenLabs text-to-speech and play the result"
)]
pub struct Cli {
    /// Your ElevenLabs API key (required, falls back to ELEVENLABS_API_KEY)
    #[arg(long)]
    pub api_key: Option<String>,

    /// Voice ID to use (required)
    #[arg(long)]
    pub voice_id: Option<String>,

    /// TTS model to use
    #[arg(long, default_value = DEFAULT_MODEL)]
    pub model_id: String,

    /// Voice stability (0.0–1.0)
    #[arg(long, default_value_t = DEFAULT_STABILITY)]
    pub stability: f64,

    /// Similarity boost (0.0–1.0)
    #[arg(long, default_value_t = DEFAULT_SIMILARITY_BOOST)]
    pub similarity: f64,

    /// Playback speed multiplier
    #[arg(long, default_value_t = DEFAULT_SPEED)]
    pub speed: f64,

    /// WS inactivity timeout in seconds (max 180)
    #[arg(long, default_value_t = DEFAULT_INACTIVITY_TIMEOUT)]
    pub timeout: u64,

    /// Where to write the audio of each segment
    #[arg(long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Audio player program
    #[arg(long, default_value = DEFAULT_PLAYER)]
    pub player: String,

    /// WebSocket API root
    #[arg(long, default_value = BASE_URL)]
    pub base_url: String,
}

/// Everything the driver needs, resolved from flags and the environment.
#[derive(Debug)]
pub struct AppConfig {
    pub client: Config,
    pub voice_settings: VoiceSettings,
    pub output: PathBuf,
    pub player: String,
    pub keep_alive_interval: Duration,
    pub log_level: Level,
}

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required flag: --{0}")]
    MissingFlag(&'static str),
    #[error("Invalid log level provided for RUST_LOG: {0}")]
    InvalidLogLevel(String),
}

impl AppConfig {
    /// Builds the configuration from parsed flags.
    ///
    /// A `.env` file in the working directory is loaded first, so `ELEVENLABS_API_KEY`
    /// and `RUST_LOG` can live there. `RUST_LOG` defaults to `INFO`.
    pub fn from_cli(cli: Cli) -> Result<Self, ConfigError> {
        // Ignored if not present.
        dotenvy::dotenv().ok();
        Self::resolve(cli, |key| std::env::var(key).ok())
    }

    fn resolve(cli: Cli, env: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_key = cli
            .api_key
            .or_else(|| env(ELEVENLABS_API_KEY))
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::MissingFlag("api-key"))?;
        let voice_id = cli
            .voice_id
            .filter(|id| !id.is_empty())
            .ok_or(ConfigError::MissingFlag("voice-id"))?;

        let log_level_str = env("RUST_LOG").unwrap_or_else(|| "INFO".to_string());
        let log_level = log_level_str
            .parse::<Level>()
            .map_err(|_| ConfigError::InvalidLogLevel(log_level_str))?;

        let client = Config::builder()
            .with_base_url(&cli.base_url)
            .with_api_key(&api_key)
            .with_voice_id(&voice_id)
            .with_model_id(&cli.model_id)
            .with_inactivity_timeout(cli.timeout)
            .build();

        let voice_settings = VoiceSettings::new()
            .with_stability(cli.stability)
            .with_similarity_boost(cli.similarity)
            .with_speed(cli.speed);

        Ok(Self {
            client,
            voice_settings,
            output: cli.output,
            player: cli.player,
            keep_alive_interval: KEEP_ALIVE_INTERVAL,
            log_level,
        })
    }
}
