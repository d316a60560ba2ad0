//! Page-number range with ellipsis markers

use std::fmt;

/// Sibling pages shown on each side of the current page by default
pub const DEFAULT_SIBLING_COUNT: usize = 1;

/// Up to this many pages are listed without any ellipsis
const MAX_PLAIN_PAGES: usize = 5;

/// One control in a page range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageItem {
    /// 1-based page number
    Page(usize),
    /// Elided run of pages
    Ellipsis,
}

impl fmt::Display for PageItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageItem::Page(page) => write!(f, "{}", page),
            PageItem::Ellipsis => f.write_str("…"),
        }
    }
}

/// Inputs of [`pagination_range`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeRequest {
    pub total_count: usize,
    pub page_size: usize,
    /// 1-based; not validated against the page count
    pub current_page: usize,
    pub sibling_count: usize,
    /// Narrow viewport layout
    pub compact: bool,
}

impl RangeRequest {
    pub fn new(total_count: usize, page_size: usize, current_page: usize) -> Self {
        Self {
            total_count,
            page_size,
            current_page,
            sibling_count: DEFAULT_SIBLING_COUNT,
            compact: false,
        }
    }

    pub fn with_siblings(mut self, sibling_count: usize) -> Self {
        self.sibling_count = sibling_count;
        self
    }

    pub fn compact(mut self, compact: bool) -> Self {
        self.compact = compact;
        self
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.total_count, self.page_size)
    }
}

/// `ceil(total_count / page_size)`, zero when the page size is zero
pub fn total_pages(total_count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        0
    } else {
        total_count.div_ceil(page_size)
    }
}

/// Compute the page controls to render.
///
/// Returns `None` when there is at most one page, in which case nothing
/// should be rendered.
pub fn pagination_range(request: &RangeRequest) -> Option<Vec<PageItem>> {
    let total = request.total_pages();

    let items = if total <= MAX_PLAIN_PAGES {
        (1..=total).map(PageItem::Page).collect()
    } else if request.compact {
        compact_range(request.current_page, total)
    } else {
        wide_range(request.current_page, request.sibling_count, total)
    };

    (items.len() >= 2).then_some(items)
}

fn compact_range(current: usize, total: usize) -> Vec<PageItem> {
    use PageItem::{Ellipsis, Page};

    if current <= 2 {
        vec![Page(1), Page(2), Page(3), Ellipsis, Page(total)]
    } else if current >= total - 1 {
        vec![Page(1), Ellipsis, Page(total - 2), Page(total - 1), Page(total)]
    } else {
        vec![Page(1), Ellipsis, Page(current), Ellipsis, Page(total)]
    }
}

fn wide_range(current: usize, siblings: usize, total: usize) -> Vec<PageItem> {
    // Out-of-range pages render as the nearest edge
    let current = current.clamp(1, total);
    let left = current.saturating_sub(siblings).max(1);
    let right = current.saturating_add(siblings).min(total);

    let mut items = Vec::with_capacity(2 * siblings + 5);
    if left > 1 {
        items.push(PageItem::Page(1));
        // An ellipsis has to stand for at least one hidden page
        if left > 2 {
            items.push(PageItem::Ellipsis);
        }
    }
    items.extend((left..=right).map(PageItem::Page));
    if right < total {
        if right + 1 < total {
            items.push(PageItem::Ellipsis);
        }
        items.push(PageItem::Page(total));
    }
    items
}

#[cfg(test)]
mod tests {
    use super::PageItem::{Ellipsis as E, Page as P};
    use super::*;

    fn range(total_pages: usize, current: usize, compact: bool) -> Option<Vec<PageItem>> {
        pagination_range(&RangeRequest::new(total_pages * 10, 10, current).compact(compact))
    }

    #[test]
    fn test_small_totals_list_every_page() {
        for total_count in 11..=50 {
            let request = RangeRequest::new(total_count, 10, 1);
            let expected: Vec<_> = (1..=request.total_pages()).map(P).collect();
            assert_eq!(pagination_range(&request), Some(expected.clone()));
            // Compact mode changes nothing below six pages
            assert_eq!(pagination_range(&request.compact(true)), Some(expected));
        }
    }

    #[test]
    fn test_single_page_renders_nothing() {
        assert_eq!(pagination_range(&RangeRequest::new(7, 10, 1)), None);
        assert_eq!(pagination_range(&RangeRequest::new(10, 10, 1)), None);
    }

    #[test]
    fn test_empty_and_zero_inputs_render_nothing() {
        assert_eq!(pagination_range(&RangeRequest::new(0, 10, 1)), None);
        assert_eq!(pagination_range(&RangeRequest::new(100, 0, 1)), None);
    }

    #[test]
    fn test_wide_middle_page() {
        assert_eq!(range(10, 5, false), Some(vec![P(1), E, P(4), P(5), P(6), E, P(10)]));
    }

    #[test]
    fn test_wide_edges_do_not_repeat_boundaries() {
        assert_eq!(range(10, 1, false), Some(vec![P(1), P(2), E, P(10)]));
        assert_eq!(range(10, 10, false), Some(vec![P(1), E, P(9), P(10)]));
        // Nothing hidden between 1 and 2, so no ellipsis there
        assert_eq!(range(10, 3, false), Some(vec![P(1), P(2), P(3), P(4), E, P(10)]));
        assert_eq!(range(10, 8, false), Some(vec![P(1), E, P(7), P(8), P(9), P(10)]));
    }

    #[test]
    fn test_wide_with_more_siblings() {
        let request = RangeRequest::new(200, 10, 10).with_siblings(2);
        assert_eq!(
            pagination_range(&request),
            Some(vec![P(1), E, P(8), P(9), P(10), P(11), P(12), E, P(20)])
        );
    }

    #[test]
    fn test_wide_without_siblings() {
        let request = RangeRequest::new(100, 10, 6).with_siblings(0);
        assert_eq!(pagination_range(&request), Some(vec![P(1), E, P(6), E, P(10)]));
    }

    #[test]
    fn test_wide_out_of_range_page_keeps_boundaries() {
        let request = RangeRequest::new(100, 10, 0).with_siblings(0);
        assert_eq!(pagination_range(&request), Some(vec![P(1), E, P(10)]));
        let request = RangeRequest::new(100, 10, 15).with_siblings(0);
        assert_eq!(pagination_range(&request), Some(vec![P(1), E, P(10)]));
        assert_eq!(range(10, 0, false), Some(vec![P(1), P(2), E, P(10)]));
    }

    #[test]
    fn test_compact_ranges() {
        assert_eq!(range(10, 1, true), Some(vec![P(1), P(2), P(3), E, P(10)]));
        assert_eq!(range(10, 2, true), Some(vec![P(1), P(2), P(3), E, P(10)]));
        assert_eq!(range(10, 6, true), Some(vec![P(1), E, P(6), E, P(10)]));
        assert_eq!(range(10, 9, true), Some(vec![P(1), E, P(8), P(9), P(10)]));
        assert_eq!(range(10, 10, true), Some(vec![P(1), E, P(8), P(9), P(10)]));
    }

    #[test]
    fn test_output_length_is_bounded() {
        for siblings in 0..4 {
            for current in 1..=30 {
                let request = RangeRequest::new(300, 10, current).with_siblings(siblings);
                let items = pagination_range(&request).unwrap();
                assert!(items.len() <= 2 * siblings + 5);
                assert_eq!(items.first(), Some(&P(1)));
                assert_eq!(items.last(), Some(&P(30)));
                assert!(items.contains(&P(current)));
                assert!(items.windows(2).all(|pair| pair != [E, E]));
            }
        }
    }

    #[test]
    fn test_display() {
        let line: Vec<String> = range(10, 5, false)
            .unwrap()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(line.join(" "), "1 … 4 5 6 … 10");
    }
}
