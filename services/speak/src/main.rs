use clap::{CommandFactory, Parser};
use speak_service::config::{AppConfig, Cli, ConfigError};
use speak_service::connection::ElevenLabsConnector;
use speak_service::console::BANNER;
use speak_service::driver::Driver;
use speak_service::playback::FilePlayback;
use std::process::ExitCode;
use tokio::io::BufReader;
use tracing_subscriber::fmt::time::ChronoLocal;

#[tokio::main]
async fn main() -> ExitCode {
    // --- 1. Parse flags into an immutable configuration ---
    let config = match AppConfig::from_cli(Cli::parse()) {
        Ok(config) => config,
        Err(e @ ConfigError::MissingFlag(_)) => {
            eprintln!("{e}\n\n{}", Cli::command().render_help());
            return ExitCode::FAILURE;
        }
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    // --- 2. Initialize Logging ---
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_timer(ChronoLocal::rfc_3339())
        .init();

    // --- 3. Run segments until `exit` or end of input ---
    let playback = FilePlayback::new(config.output, config.player);
    let mut driver = Driver::new(
        ElevenLabsConnector::new(config.client),
        playback,
        config.voice_settings,
    )
    .with_keep_alive_interval(config.keep_alive_interval)
    .with_prompt(true);

    println!("{BANNER}");
    match driver.run(BufReader::new(tokio::io::stdin())).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
