//! Three-row dropdown for choosing a province, district and ward

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::{Component, PaginationBar};
use crate::location::{LocationResolver, Region, Tier};
use crate::pagination::{PaginationConfig, PaginationManager};
use crate::tui::{styles::Theme, Frame};

/// What the user asked the picker to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerAction {
    Select(Tier, Region),
}

/// Rendering snapshot of one tier
#[derive(Debug, Clone, Default)]
struct TierRow {
    options: Vec<Region>,
    selected: Option<Region>,
    enabled: bool,
    loading: bool,
}

impl TierRow {
    fn selected_index(&self) -> Option<usize> {
        let selected = self.selected.as_ref()?;
        self.options.iter().position(|option| option.code == selected.code)
    }
}

pub struct LocationPicker {
    rows: [TierRow; 3],
    focus: Tier,
    /// Whether the focused row's option list is expanded
    open: bool,
    /// Index of the highlighted option in the focused row
    highlight: usize,
    bar: PaginationBar,
    restoring: bool,
    complete: bool,
    has_focus: bool,
}

impl LocationPicker {
    pub fn new(config: PaginationConfig) -> Self {
        Self {
            rows: Default::default(),
            focus: Tier::Province,
            open: false,
            highlight: 0,
            bar: PaginationBar::new(config),
            restoring: false,
            complete: false,
            has_focus: true,
        }
    }

    /// Copy what the picker shows out of the resolver
    pub fn sync(&mut self, resolver: &LocationResolver) {
        for tier in Tier::ALL {
            let row = &mut self.rows[tier.index()];
            row.options = resolver.options(tier).to_vec();
            row.selected = resolver.selection().get(tier).cloned();
            row.enabled = resolver.is_enabled(tier);
            row.loading = resolver.is_loading(tier);
        }
        self.restoring = resolver.is_restoring();
        self.complete = resolver.is_complete();

        if self.open {
            let len = self.focused_row().options.len();
            if !self.focused_row().enabled || len == 0 {
                self.open = false;
            } else {
                self.highlight = self.highlight.min(len - 1);
                self.follow_highlight();
            }
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn focus(&self) -> Tier {
        self.focus
    }

    pub fn highlight(&self) -> usize {
        self.highlight
    }

    pub fn pagination(&self) -> &PaginationManager {
        self.bar.manager()
    }

    /// Collapse the option list
    pub fn close(&mut self) {
        self.open = false;
    }

    fn focused_row(&self) -> &TierRow {
        &self.rows[self.focus.index()]
    }

    fn open_list(&mut self) -> bool {
        if self.restoring || !self.focused_row().enabled {
            return false;
        }
        self.highlight = self.focused_row().selected_index().unwrap_or(0);
        self.follow_highlight();
        self.open = true;
        true
    }

    /// Keep the page on the highlighted option
    fn follow_highlight(&mut self) {
        let total = self.focused_row().options.len();
        let manager = self.bar.manager_mut();
        manager.set_total_items(total);
        let page = manager.page_of(self.highlight);
        manager.goto_page(page);
    }

    fn move_highlight(&mut self, forward: bool) {
        let len = self.focused_row().options.len();
        if forward && self.highlight + 1 < len {
            self.highlight += 1;
        } else if !forward && self.highlight > 0 {
            self.highlight -= 1;
        }
        self.follow_highlight();
    }

    fn change_page(&mut self, change: fn(&mut PaginationManager) -> bool) {
        let manager = self.bar.manager_mut();
        if change(manager) {
            self.highlight = manager.items_range().start;
        }
    }

    fn move_focus(&mut self, forward: bool) {
        let next = if forward {
            self.focus.child()
        } else {
            self.focus.parent()
        };
        if let Some(tier) = next {
            self.focus = tier;
        }
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) -> Option<PickerAction> {
        if !self.has_focus {
            return None;
        }

        if !self.open {
            match key.code {
                KeyCode::Up | KeyCode::BackTab => self.move_focus(false),
                KeyCode::Down | KeyCode::Tab => self.move_focus(true),
                KeyCode::Enter | KeyCode::Char(' ') => {
                    self.open_list();
                }
                _ => {}
            }
            return None;
        }

        match key.code {
            KeyCode::Up => self.move_highlight(false),
            KeyCode::Down => self.move_highlight(true),
            KeyCode::Left | KeyCode::PageUp => self.change_page(PaginationManager::previous_page),
            KeyCode::Right | KeyCode::PageDown => self.change_page(PaginationManager::next_page),
            KeyCode::Home => self.change_page(PaginationManager::first_page),
            KeyCode::End => self.change_page(PaginationManager::last_page),
            KeyCode::Esc => self.open = false,
            KeyCode::Enter => {
                let tier = self.focus;
                let option = self.focused_row().options.get(self.highlight).cloned()?;
                self.open = false;
                self.move_focus(true);
                return Some(PickerAction::Select(tier, option));
            }
            _ => {}
        }
        None
    }

    fn row_line(&self, tier: Tier, width: u16, theme: &Theme) -> Line<'static> {
        let row = &self.rows[tier.index()];
        let focused = self.has_focus && tier == self.focus;
        let marker = if focused { "▸ " } else { "  " };
        let label = format!("{}{:<9}", marker, tier.label());
        let room = (width as usize).saturating_sub(label.chars().count() + 1);

        let (value, style) = if let Some(selected) = &row.selected {
            (fit(&selected.name, room), theme.text_style())
        } else if row.loading {
            ("loading…".to_string(), theme.loading_style())
        } else if row.enabled {
            ("choose…".to_string(), theme.placeholder_style())
        } else {
            ("—".to_string(), theme.disabled_style())
        };

        let label_style = if focused {
            theme.focused_border_style()
        } else if row.enabled || row.selected.is_some() {
            theme.text_style()
        } else {
            theme.disabled_style()
        };

        Line::from(vec![
            Span::styled(label, label_style),
            Span::raw(" "),
            Span::styled(value, style),
        ])
    }

    fn option_lines(&self, width: u16, theme: &Theme) -> Vec<Line<'static>> {
        let row = self.focused_row();
        let selected = row.selected_index();
        self.bar
            .manager()
            .items_range()
            .filter_map(|index| row.options.get(index).map(|option| (index, option)))
            .map(|(index, option)| {
                let mark = if Some(index) == selected { "✓ " } else { "  " };
                let text = format!("{}{}", mark, fit(&option.name, (width as usize).saturating_sub(2)));
                let style = if index == self.highlight {
                    theme.selection_style()
                } else {
                    theme.text_style()
                };
                Line::from(Span::styled(text, style))
            })
            .collect()
    }

    fn footer_line(&self, theme: &Theme) -> Line<'static> {
        if self.restoring {
            Line::from(Span::styled("Restoring saved address…", theme.loading_style()))
        } else if self.complete {
            Line::from(Span::styled("Address complete", theme.success_style()))
        } else {
            Line::from(Span::styled(
                "Enter to choose, Ctrl+G for help",
                theme.placeholder_style(),
            ))
        }
    }
}

/// Cut `text` to at most `width` terminal columns
fn fit(text: &str, width: usize) -> String {
    if UnicodeWidthStr::width(text) <= width {
        return text.to_string();
    }

    let mut used = 0;
    let mut out = String::new();
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push('…');
    out
}

impl Component for LocationPicker {
    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let border_style = if self.has_focus {
            theme.focused_border_style()
        } else {
            theme.border_style()
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Donor address ")
            .border_style(border_style)
            .style(theme.base_style());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Tier rows
                Constraint::Length(1), // Spacer
                Constraint::Min(1),    // Options or footer
                Constraint::Length(1), // Page controls
            ])
            .split(inner);

        let rows: Vec<Line<'static>> = Tier::ALL
            .iter()
            .map(|tier| self.row_line(*tier, chunks[0].width, theme))
            .collect();
        frame.render_widget(Paragraph::new(rows), chunks[0]);

        if self.open {
            let lines = self.option_lines(chunks[2].width, theme);
            frame.render_widget(Paragraph::new(lines), chunks[2]);
            self.bar.render(frame, chunks[3], theme);
        } else {
            frame.render_widget(Paragraph::new(self.footer_line(theme)), chunks[2]);
        }
    }

    fn has_focus(&self) -> bool {
        self.has_focus
    }

    fn set_focus(&mut self, focus: bool) {
        self.has_focus = focus;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::Step;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn provinces(count: usize) -> Vec<Region> {
        (1..=count)
            .map(|i| Region::new(i.to_string(), format!("Province {}", i)))
            .collect()
    }

    fn picker_with(count: usize) -> (LocationResolver, LocationPicker) {
        let mut resolver = LocationResolver::new();
        let ticket = resolver.load_provinces();
        resolver.apply(&ticket, Ok(provinces(count)));
        let mut picker = LocationPicker::new(PaginationConfig {
            page_size: 5,
            ..PaginationConfig::default()
        });
        picker.sync(&resolver);
        (resolver, picker)
    }

    #[test]
    fn test_enter_opens_and_selects() {
        let (_, mut picker) = picker_with(3);
        assert_eq!(picker.handle_key_event(key(KeyCode::Enter)), None);
        assert!(picker.is_open());

        picker.handle_key_event(key(KeyCode::Down));
        let action = picker.handle_key_event(key(KeyCode::Enter));
        assert_eq!(action, Some(PickerAction::Select(Tier::Province, Region::new("2", "Province 2"))));
        assert!(!picker.is_open());
        assert_eq!(picker.focus(), Tier::District);
    }

    #[test]
    fn test_disabled_row_does_not_open() {
        let (_, mut picker) = picker_with(3);
        picker.handle_key_event(key(KeyCode::Down));
        assert_eq!(picker.focus(), Tier::District);
        picker.handle_key_event(key(KeyCode::Enter));
        assert!(!picker.is_open());
    }

    #[test]
    fn test_paging_moves_highlight() {
        let (_, mut picker) = picker_with(12);
        picker.handle_key_event(key(KeyCode::Enter));
        assert_eq!(picker.pagination().total_pages(), 3);

        picker.handle_key_event(key(KeyCode::Right));
        assert_eq!(picker.pagination().current_page(), 2);
        assert_eq!(picker.highlight(), 5);

        picker.handle_key_event(key(KeyCode::End));
        assert_eq!(picker.highlight(), 10);

        // Moving up across a page boundary follows the highlight
        for _ in 0..2 {
            picker.handle_key_event(key(KeyCode::Up));
        }
        assert_eq!(picker.highlight(), 8);
        assert_eq!(picker.pagination().current_page(), 2);
    }

    #[test]
    fn test_reopening_highlights_current_choice() {
        let (mut resolver, mut picker) = picker_with(12);
        let step = resolver.select_province(Region::new("9", "Province 9")).unwrap();
        assert!(matches!(step, Step { fetch: Some(_), .. }));
        picker.sync(&resolver);

        picker.handle_key_event(key(KeyCode::Enter));
        assert_eq!(picker.highlight(), 8);
        assert_eq!(picker.pagination().current_page(), 2);
    }

    #[test]
    fn test_unfocused_picker_ignores_keys() {
        let (_, mut picker) = picker_with(3);
        picker.set_focus(false);
        assert_eq!(picker.handle_key_event(key(KeyCode::Enter)), None);
        assert!(!picker.is_open());

        picker.set_focus(true);
        picker.handle_key_event(key(KeyCode::Enter));
        assert!(picker.is_open());
    }

    #[test]
    fn test_fit_truncates_by_width() {
        assert_eq!(fit("Hà Nội", 10), "Hà Nội");
        assert_eq!(fit("Thành phố Hồ Chí Minh", 10), "Thành phố…");
    }
}
