//! Page navigation state for long lists

use serde::{Deserialize, Serialize};
use std::ops::Range;
use tracing::debug;

use super::range::{pagination_range, total_pages, PageItem, RangeRequest, DEFAULT_SIBLING_COUNT};

/// Pagination settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    /// Items per page
    pub page_size: usize,

    /// Pages shown on each side of the current one
    pub sibling_count: usize,

    /// Viewports narrower than this many columns use the compact layout
    pub compact_width: u16,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            page_size: 10,
            sibling_count: DEFAULT_SIBLING_COUNT,
            compact_width: 60,
        }
    }
}

impl PaginationConfig {
    pub fn is_compact(&self, width: u16) -> bool {
        width < self.compact_width
    }
}

/// Current page of a list with a known item count
#[derive(Debug, Clone)]
pub struct PaginationManager {
    /// Current page (1-based)
    current_page: usize,

    /// Items per page
    page_size: usize,

    /// Total number of items
    total_items: usize,

    sibling_count: usize,
}

impl PaginationManager {
    pub fn new(config: &PaginationConfig) -> Self {
        Self {
            current_page: 1,
            page_size: config.page_size.max(1),
            total_items: 0,
            sibling_count: config.sibling_count,
        }
    }

    /// Set the total number of items, keeping the current page in range
    pub fn set_total_items(&mut self, total: usize) {
        self.total_items = total;
        self.current_page = self.current_page.min(self.last_page_number());
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_items(&self) -> usize {
        self.total_items
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.total_items, self.page_size)
    }

    /// Highest valid page; an empty list still has page 1
    fn last_page_number(&self) -> usize {
        self.total_pages().max(1)
    }

    /// Item indices shown on the current page
    pub fn items_range(&self) -> Range<usize> {
        let start = ((self.current_page - 1) * self.page_size).min(self.total_items);
        let end = (start + self.page_size).min(self.total_items);
        start..end
    }

    /// Page holding the item at `index`
    pub fn page_of(&self, index: usize) -> usize {
        index / self.page_size + 1
    }

    /// Go to a page, clamped to the valid range. Returns whether the page
    /// changed.
    pub fn goto_page(&mut self, page: usize) -> bool {
        let old_page = self.current_page;
        let new_page = page.clamp(1, self.last_page_number());
        if old_page != new_page {
            debug!("Page changed: {} -> {}", old_page, new_page);
            self.current_page = new_page;
        }
        old_page != new_page
    }

    pub fn next_page(&mut self) -> bool {
        self.goto_page(self.current_page + 1)
    }

    pub fn previous_page(&mut self) -> bool {
        self.goto_page(self.current_page.saturating_sub(1))
    }

    pub fn first_page(&mut self) -> bool {
        self.goto_page(1)
    }

    pub fn last_page(&mut self) -> bool {
        self.goto_page(self.last_page_number())
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages()
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    /// Controls to render for the current page
    pub fn range(&self, compact: bool) -> Option<Vec<PageItem>> {
        let request = RangeRequest::new(self.total_items, self.page_size, self.current_page)
            .with_siblings(self.sibling_count)
            .compact(compact);
        pagination_range(&request)
    }
}
