//! Page controls for long lists: the range builder and page navigation

pub mod manager;
pub mod range;

pub use manager::{PaginationConfig, PaginationManager};
pub use range::{pagination_range, total_pages, PageItem, RangeRequest, DEFAULT_SIBLING_COUNT};
