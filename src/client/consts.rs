use std::time::Duration;

pub const ELEVENLABS_API_KEY: &str = "ELEVENLABS_API_KEY";

pub const BASE_URL: &str = "wss://api.elevenlabs.io/v1";
pub const DEFAULT_MODEL: &str = "eleven_flash_v2_5";

pub const API_KEY_HEADER: &str = "xi-api-key";

/// Seconds of silence the endpoint tolerates before closing the stream.
pub const DEFAULT_INACTIVITY_TIMEOUT: u64 = 120;
/// Upper bound the endpoint accepts for `inactivity_timeout`. Not enforced locally.
pub const MAX_INACTIVITY_TIMEOUT: u64 = 180;

/// Deadline for each read while waiting for audio.
pub const READ_TIMEOUT: Duration = Duration::from_secs(5);
pub const KEEP_ALIVE_INTERVAL: Duration = Duration::from_secs(15);
