mod cli;

use crate::cli::{Cli, Commands};
use clap::Parser;
use tracing::{error, info};

use exhibition_gallery::application::use_cases::RunApplicationUseCase;
use exhibition_gallery::config::AppConfig;
use exhibition_gallery::debug::{DebugConfig, init_logging};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    let debug_config = DebugConfig::default();
    if let Err(e) = init_logging(&debug_config) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            port,
            host,
            data_dir,
            uploads_dir,
        } => {
            info!("Starting application...");

            let config = match AppConfig::load(host, port, data_dir, uploads_dir) {
                Ok(config) => config,
                Err(e) => {
                    error!("Configuration error: {}", e);
                    eprintln!("❌ Configuration error: {}", e);
                    std::process::exit(1);
                }
            };

            let use_case = RunApplicationUseCase::new(config);
            match use_case.execute().await {
                Ok(_) => {
                    info!("Application terminated normally");
                }
                Err(e) => {
                    error!("Application failed: {}", e);
                    eprintln!("❌ Application failed: {}", e);
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}
