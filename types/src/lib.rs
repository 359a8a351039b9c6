//now people using the types library can use these types
pub mod audio;
pub mod events;
pub mod voice;

//re-export types for easier access
pub use events::{ClientMessage, ServerMessage};
pub use voice::VoiceSettings;
