//! Legalis - plain-language risk audits of legal documents
//!
#![doc = "Legalis - plain-language risk audits of legal documents"]
#![doc = "Main entry point for the Legalis command-line application."]

use anyhow::Result;

use legalis::cli::{Cli, Commands};
use legalis::commands;
use legalis::config::Config;
use legalis::logging::init_logging;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    // Initialize tracing
    init_logging(cli.verbose, cli.json_logs)?;

    // Load configuration
    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path, &cli)?;

    // Validate configuration
    config.validate()?;

    // Execute command
    match cli.command {
        Commands::Analyze {
            source,
            model,
            json,
        } => {
            tracing::info!("Starting analysis");
            if let Some(m) = &model {
                tracing::debug!("Using model override: {}", m);
            }
            commands::analyze::run_analyze(config, source, model, json).await?;
            Ok(())
        }
        Commands::History { command } => {
            tracing::debug!("Starting history command");
            commands::history::handle_history(&config, command)?;
            Ok(())
        }
        Commands::Auth { command } => {
            tracing::debug!("Starting account command");
            commands::auth::handle_auth(&config, command).await?;
            Ok(())
        }
    }
}
