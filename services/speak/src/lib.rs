pub mod config;
pub mod connection;
pub mod console;
pub mod driver;
pub mod playback;
