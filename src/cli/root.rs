use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

use super::{
    locations::LocationsCommand, pages::PagesCommand, pick::PickCommand,
    resolve::ResolveCommand,
};
use crate::config::Config;
use crate::location::{HttpLocationClient, LocationLookup, StaticLocations};

/// donorlink - donor and recipient address forms for the blood-donation platform
#[derive(Parser)]
#[command(
    name = "donorlink",
    version,
    about = "Donor and recipient address forms for the blood-donation platform",
    long_about = r#"donorlink fills in the Province / District / Ward address of a donation
request from the terminal and prints the page controls used by list views.

Examples:
  donorlink                                   # Pick an address interactively
  donorlink pick --value "Hà Nội_Ba Đình_Phúc Xá"
  donorlink locations districts 1 --page 2
  donorlink pages --total 240 --page 7"#
)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short = 'd', long = "debug", global = true)]
    pub debug: bool,

    /// Configuration file to use instead of the default search path
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// Answer lookups from a JSON province/district/ward tree instead of the API
    #[arg(long = "offline", global = true, value_name = "TREE_JSON")]
    pub offline: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Pick an address interactively
    Pick(PickCommand),

    /// List provinces, districts or wards
    Locations(LocationsCommand),

    /// Restore a saved address value and show how far it resolves
    Resolve(ResolveCommand),

    /// Print the page controls for a list
    Pages(PagesCommand),
}

impl Cli {
    /// Whether the command takes over the terminal
    pub fn is_interactive(&self) -> bool {
        matches!(self.command, None | Some(Commands::Pick(_)))
    }

    pub async fn execute(self, config: Config) -> Result<()> {
        debug!("Configuration initialized");
        config.validate()?;

        match &self.command {
            Some(Commands::Pick(cmd)) => cmd.execute(&config, self.lookup(&config).await?).await,
            None => {
                PickCommand::default()
                    .execute(&config, self.lookup(&config).await?)
                    .await
            }
            Some(Commands::Locations(cmd)) => {
                cmd.execute(&config, self.lookup(&config).await?).await
            }
            Some(Commands::Resolve(cmd)) => {
                cmd.execute(&config, self.lookup(&config).await?).await
            }
            Some(Commands::Pages(cmd)) => cmd.execute(&config),
        }
    }

    async fn lookup(&self, config: &Config) -> Result<Arc<dyn LocationLookup>> {
        match &self.offline {
            Some(path) => {
                info!("Using offline locations from {}", path.display());
                let locations = StaticLocations::from_path(path)
                    .await
                    .with_context(|| format!("Failed to load {}", path.display()))?;
                Ok(Arc::new(locations))
            }
            None => {
                info!("Using location API at {}", config.api_url);
                Ok(Arc::new(HttpLocationClient::from_config(config)?))
            }
        }
    }
}
