//! Page controls rendered under a paginated list

use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::Component;
use crate::pagination::{PageItem, PaginationConfig, PaginationManager};
use crate::tui::{styles::Theme, Frame};

/// Renders `‹ 1 … 4 [5] 6 … 10 ›` for a [`PaginationManager`], switching to
/// the compact range when the area is narrower than the configured width
#[derive(Debug, Clone)]
pub struct PaginationBar {
    manager: PaginationManager,
    config: PaginationConfig,
}

impl PaginationBar {
    pub fn new(config: PaginationConfig) -> Self {
        Self {
            manager: PaginationManager::new(&config),
            config,
        }
    }

    pub fn manager(&self) -> &PaginationManager {
        &self.manager
    }

    pub fn manager_mut(&mut self) -> &mut PaginationManager {
        &mut self.manager
    }

    /// The controls for an area `width` columns wide; `None` when there is
    /// only one page
    pub fn line(&self, width: u16, theme: &Theme) -> Option<Line<'static>> {
        let items = self.manager.range(self.config.is_compact(width))?;
        let current = self.manager.current_page();

        let arrow_style = |enabled: bool| {
            if enabled {
                theme.text_style()
            } else {
                theme.disabled_style()
            }
        };

        let mut spans = Vec::with_capacity(items.len() + 2);
        spans.push(Span::styled("‹ ", arrow_style(self.manager.has_previous())));
        for item in items {
            let span = match item {
                PageItem::Page(page) if page == current => {
                    Span::styled(format!("[{}]", page), theme.current_page_style())
                }
                PageItem::Page(page) => Span::styled(format!(" {} ", page), theme.page_style()),
                PageItem::Ellipsis => Span::styled(" … ", theme.disabled_style()),
            };
            spans.push(span);
        }
        spans.push(Span::styled(" ›", arrow_style(self.manager.has_next())));

        Some(Line::from(spans))
    }
}

impl Component for PaginationBar {
    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        if let Some(line) = self.line(area.width, theme) {
            frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
        }
    }
}
