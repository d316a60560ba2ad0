use anyhow::{Context, Result};
use clap::Parser;
use std::fs::{self, File};
use std::path::Path;
use std::sync::Mutex;
use tracing::{debug, error};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod config;
mod location;
mod pagination;
mod tui;

use cli::Cli;
use config::Config;

#[tokio::main]
async fn main() {
    // Set up panic hook for graceful error recovery
    std::panic::set_hook(Box::new(|panic_info| {
        error!("Application panicked: {}", panic_info);
        std::process::exit(1);
    }));

    // Load environment variables from .env file
    let dotenv = dotenvy::dotenv();

    if let Err(e) = execute().await {
        error!("Application error: {:#}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    if let Err(e) = dotenv {
        debug!("No .env file loaded: {}", e);
    }
}

async fn execute() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::init(cli.config.as_deref()).await?;

    let log_file = cli.is_interactive().then(|| config.log_file());
    init_logging(cli.debug, log_file.as_deref())?;

    cli.execute(config).await
}

/// Log to stderr, or to a file while the picker owns the terminal
fn init_logging(debug: bool, log_file: Option<&Path>) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if debug {
            "donorlink=debug".into()
        } else {
            "donorlink=info".into()
        }
    });

    let registry = tracing_subscriber::registry().with(env_filter);
    let result = match log_file {
        Some(path) => {
            if let Some(dir) = path.parent() {
                fs::create_dir_all(dir)
                    .with_context(|| format!("Failed to create {}", dir.display()))?;
            }
            let file = File::options()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .try_init()
        }
        None => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init(),
    };

    result.map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))
}
