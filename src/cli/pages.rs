use anyhow::{bail, Result};
use clap::Args;
use tracing::debug;

use crate::config::Config;
use crate::pagination::{pagination_range, PageItem, RangeRequest};

/// Width assumed when stdout is not a terminal
const FALLBACK_WIDTH: u16 = 80;

/// Print the page controls for a list
#[derive(Debug, Args)]
pub struct PagesCommand {
    /// Number of items in the list
    #[arg(short, long)]
    pub total: usize,

    /// Items per page (defaults to the configured page size)
    #[arg(short = 's', long)]
    pub page_size: Option<usize>,

    /// Current page (1-based)
    #[arg(short, long, default_value = "1")]
    pub page: usize,

    /// Pages shown on each side of the current one
    #[arg(long)]
    pub siblings: Option<usize>,

    /// Force the compact layout
    #[arg(long, conflicts_with = "width")]
    pub compact: bool,

    /// Decide the layout as if rendering at this width
    #[arg(short, long)]
    pub width: Option<u16>,
}

impl PagesCommand {
    pub fn execute(&self, config: &Config) -> Result<()> {
        let page_size = self.page_size.unwrap_or(config.pagination.page_size);
        if page_size == 0 {
            bail!("Page size must be at least 1");
        }

        let compact = self.compact
            || config
                .pagination
                .is_compact(self.width.unwrap_or_else(terminal_width));
        let request = RangeRequest::new(self.total, page_size, self.page)
            .with_siblings(self.siblings.unwrap_or(config.pagination.sibling_count))
            .compact(compact);
        debug!("Building page range for {:?}", request);

        match pagination_range(&request) {
            Some(items) => println!("{}", format_range(&items, self.page)),
            None => println!("Nothing to paginate"),
        }
        Ok(())
    }
}

/// Render page items on one line with the current page in brackets
pub fn format_range(items: &[PageItem], current_page: usize) -> String {
    items
        .iter()
        .map(|item| match item {
            PageItem::Page(page) if *page == current_page => format!("[{}]", page),
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn terminal_width() -> u16 {
    crossterm::terminal::size()
        .map(|(width, _)| width)
        .unwrap_or(FALLBACK_WIDTH)
}
