//! NetWatch console CLI
//!
//! Command-line interface for controlling and observing the detection
//! backend.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use netwatch_console::{load_config, Config};
use tracing::Level;

#[derive(Parser)]
#[command(name = "console")]
#[command(about = "Control and log console for the NetWatch detection backend")]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Backend base URL (overrides config file)
    #[arg(long)]
    backend_url: Option<String>,

    /// Log level
    #[arg(short, long, default_value = "info")]
    log_level: Level,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the live dashboard until interrupted
    Watch,
    /// Start the monitored system
    Start,
    /// Stop the monitored system
    Stop,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .init();

    let mut config = if let Some(config_path) = &args.config {
        tracing::debug!("Loading configuration from {:?}", config_path);
        match load_config(config_path) {
            Ok(config) => config,
            Err(e) => {
                tracing::error!("{}", e);
                return ExitCode::FAILURE;
            }
        }
    } else {
        tracing::debug!("Using default configuration");
        Config::default()
    };

    if let Some(backend_url) = args.backend_url {
        config.backend.base_url = backend_url;
    }

    match args.command {
        Command::Watch => match netwatch_console::run(config).await {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                tracing::error!("Console failed: {}", e);
                ExitCode::FAILURE
            }
        },
        Command::Start => run_control(&config, true).await,
        Command::Stop => run_control(&config, false).await,
    }
}

async fn run_control(config: &Config, start: bool) -> ExitCode {
    let view = netwatch_console::build_view(config, false);
    let controller = netwatch_console::build_controller(config, view);

    let result = if start {
        controller.start_system().await
    } else {
        controller.stop_system().await
    };

    // Errors have already been surfaced through the view's alert
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}
