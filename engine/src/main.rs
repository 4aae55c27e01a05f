// Delver Research Engine
// Main entry point for the delver binary

use clap::Parser;
use delver_engine::cli::{Cli, Command};
use delver_engine::config::Config;
use delver_engine::handlers::{handle_research, handle_status, OutputFormat};
use delver_engine::telemetry::init_telemetry_with_level;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration; read once, immutable for the run
    let config = Config::from_env()?;

    // CLI flag wins over config-driven log level; RUST_LOG wins over both
    let log_level = cli.log.as_deref().unwrap_or(&config.core.log_level);
    init_telemetry_with_level(log_level);

    tracing::info!("Delver Engine v{}", env!("CARGO_PKG_VERSION"));

    // Determine output format
    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };

    match cli.command {
        Command::Research { topic } => {
            tracing::info!("Researching topic: {}", topic);
            handle_research(topic, &config, format).await
        }

        Command::Status => {
            tracing::info!("Checking provider status...");
            handle_status(&config, format).await
        }
    }
}
