mod client;

pub use elevenlabs_stream_types as types;
pub use client::audio::AudioBuffer;
pub use client::config::{Config, ConfigBuilder};
pub use client::consts;
pub use client::error::ClientError;
pub use client::keep_alive::KeepAlive;
pub use client::receive::receive_audio;
pub use client::sink::{MessageSink, SharedWriter};
pub use client::{connect, Client};
