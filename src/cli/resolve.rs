use anyhow::{bail, Result};
use clap::Args;
use std::sync::Arc;
use tracing::{debug, info};

use crate::config::Config;
use crate::location::{LocationLookup, LocationNames, LocationResolver, Step, Tier};

/// Restore a saved address value and show how far it resolves
#[derive(Debug, Args)]
pub struct ResolveCommand {
    /// Saved value in "Province_District_Ward" form
    pub value: String,
}

impl ResolveCommand {
    pub async fn execute(&self, config: &Config, lookup: Arc<dyn LocationLookup>) -> Result<()> {
        let Some(names) = LocationNames::parse(&self.value) else {
            bail!("Nothing to resolve in {:?}", self.value);
        };
        debug!("Resolving {:?} for field {}", names, config.form.value_field);

        let mut resolver = LocationResolver::new();
        let ticket = resolver.load_provinces();
        resolver.settle(lookup.as_ref(), Step::fetching(ticket)).await;

        let step = resolver.restore(&self.value);
        let published = resolver.settle(lookup.as_ref(), step).await;

        for tier in Tier::ALL {
            let wanted = names.get(tier).unwrap_or("-");
            let found = resolver
                .selection()
                .get(tier)
                .map(|region| format!("{} ({})", region.name, region.code))
                .unwrap_or_else(|| "-".to_string());
            println!("{:<9} {:<24} {}", tier.label(), wanted, found);
        }

        match published {
            Some(value) => {
                info!("Resolved {:?}", value.value);
                println!();
                println!("{}: {}", config.form.value_field, value.value);
                println!("{}: {}", config.form.label_field, value.label);
            }
            None => {
                println!();
                println!("Partially resolved; nothing would be published");
            }
        }
        Ok(())
    }
}
