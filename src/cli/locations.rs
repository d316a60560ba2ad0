use anyhow::Result;
use clap::{Args, Subcommand};
use std::sync::Arc;
use tracing::debug;

use super::pages::{format_range, terminal_width};
use crate::config::Config;
use crate::location::{fetch, FetchTicket, LocationLookup, Region, Tier};
use crate::pagination::PaginationManager;

/// List provinces, districts or wards
#[derive(Debug, Args)]
pub struct LocationsCommand {
    #[command(subcommand)]
    pub tier: TierCommand,

    /// Page to show (1-based)
    #[arg(short, long, default_value = "1", global = true)]
    pub page: usize,

    /// Print the whole list as JSON instead of a page of text
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Debug, Subcommand)]
pub enum TierCommand {
    /// All provinces
    Provinces,
    /// Districts of a province
    Districts {
        /// Province code
        province_code: String,
    },
    /// Wards of a district
    Wards {
        /// District code
        district_code: String,
    },
}

impl TierCommand {
    fn ticket(&self) -> FetchTicket {
        let (tier, parent) = match self {
            TierCommand::Provinces => (Tier::Province, None),
            TierCommand::Districts { province_code } => (Tier::District, Some(province_code.clone())),
            TierCommand::Wards { district_code } => (Tier::Ward, Some(district_code.clone())),
        };
        FetchTicket { tier, parent, seq: 0 }
    }
}

impl LocationsCommand {
    pub async fn execute(&self, config: &Config, lookup: Arc<dyn LocationLookup>) -> Result<()> {
        let ticket = self.tier.ticket();
        debug!("Listing {} options via {}", ticket.tier, lookup.name());
        let regions = fetch(lookup.as_ref(), &ticket).await?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&regions)?);
            return Ok(());
        }

        let mut pages = PaginationManager::new(&config.pagination);
        pages.set_total_items(regions.len());
        pages.goto_page(self.page);

        for line in page_lines(&regions, &pages) {
            println!("{}", line);
        }

        let compact = config.pagination.is_compact(terminal_width());
        if let Some(items) = pages.range(compact) {
            println!();
            println!("{}", format_range(&items, pages.current_page()));
        }
        println!("{} {}(s)", regions.len(), ticket.tier.label().to_lowercase());
        Ok(())
    }
}

fn page_lines(regions: &[Region], pages: &PaginationManager) -> Vec<String> {
    let width = regions[pages.items_range()]
        .iter()
        .map(|region| region.code.chars().count())
        .max()
        .unwrap_or(0);

    regions[pages.items_range()]
        .iter()
        .map(|region| format!("{:>width$}  {}", region.code, region.name, width = width))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagination::PaginationConfig;

    #[test]
    fn test_page_lines_align_codes() {
        let regions: Vec<Region> = (1..=12)
            .map(|i| Region::new(i.to_string(), format!("Ward {}", i)))
            .collect();
        let mut pages = PaginationManager::new(&PaginationConfig::default());
        pages.set_total_items(regions.len());
        pages.goto_page(2);

        assert_eq!(page_lines(&regions, &pages), vec!["11  Ward 11", "12  Ward 12"]);
    }

    #[test]
    fn test_ticket_for_each_tier() {
        let ticket = TierCommand::Wards { district_code: "271".to_string() }.ticket();
        assert_eq!(ticket.tier, Tier::Ward);
        assert_eq!(ticket.parent.as_deref(), Some("271"));
        assert_eq!(TierCommand::Provinces.ticket().parent, None);
    }
}
