use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::widgets::{Block, Borders, Paragraph};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::location::{
    fetch, FetchTicket, FormState, LocationField, LocationLookup, LocationResolver,
    LocationResult, MemoryForm, Region, Step, Tier,
};
use crate::pagination::PaginationConfig;
use crate::tui::{
    components::{Component, LocationPicker, PickerAction},
    events::Event,
    keys::KeyMap,
    styles::Theme,
    Frame,
};

/// Address form: one location picker bound to one form
pub struct App {
    /// Whether the application should quit
    pub should_quit: bool,

    resolver: LocationResolver,
    lookup: Arc<dyn LocationLookup>,
    form: MemoryForm,
    field: LocationField,
    picker: LocationPicker,

    key_map: KeyMap,
    theme: Theme,
    show_help: bool,

    /// Status message to display
    status_message: Option<String>,

    /// Tier whose failed lookup the status message reports
    failed_tier: Option<Tier>,

    /// Sender used by lookup tasks to report back
    event_sender: mpsc::UnboundedSender<Event>,
}

impl App {
    pub fn new(
        lookup: Arc<dyn LocationLookup>,
        form: MemoryForm,
        field: LocationField,
        pagination: PaginationConfig,
        event_sender: mpsc::UnboundedSender<Event>,
    ) -> Self {
        Self {
            should_quit: false,
            resolver: LocationResolver::new(),
            lookup,
            form,
            field,
            picker: LocationPicker::new(pagination),
            key_map: KeyMap::default(),
            theme: Theme::default(),
            show_help: false,
            status_message: None,
            failed_tier: None,
            event_sender,
        }
    }

    /// Load provinces and restore whatever the form already holds
    pub fn start(&mut self) {
        let ticket = self.resolver.load_provinces();
        self.spawn_fetch(ticket);

        let step = self.field.mount(&self.form, &mut self.resolver);
        self.commit(step);
    }

    pub fn form(&self) -> &MemoryForm {
        &self.form
    }

    pub fn into_form(self) -> MemoryForm {
        self.form
    }

    fn spawn_fetch(&self, ticket: FetchTicket) {
        let lookup = Arc::clone(&self.lookup);
        let sender = self.event_sender.clone();
        debug!("Spawning {} lookup #{} via {}", ticket.tier, ticket.seq, lookup.name());

        tokio::spawn(async move {
            let result = fetch(lookup.as_ref(), &ticket).await;
            if sender.send(Event::Fetched { ticket, result }).is_err() {
                debug!("Lookup finished after the picker closed");
            }
        });
    }

    /// Carry out a resolver step and refresh the picker
    fn commit(&mut self, step: Step) {
        if let Some(value) = &step.publish {
            self.picker.close();
            self.status_message = Some(format!("Address: {}", value.label));
        }
        if let Some(ticket) = self.field.commit(&mut self.form, step) {
            self.spawn_fetch(ticket);
        }
        self.picker.sync(&self.resolver);
    }

    /// Handle incoming events. Returns true when the app should exit.
    pub fn handle_event(&mut self, event: Event) -> Result<bool> {
        match event {
            Event::Key(key_event) => self.handle_key_event(key_event),
            Event::Fetched { ticket, result } => {
                if self.resolver.is_current(&ticket) {
                    self.report_fetch(&ticket, &result);
                }
                let step = self.resolver.apply(&ticket, result);
                self.commit(step);
            }
            Event::Resize(_, _) | Event::Tick => {}
        }

        Ok(self.should_quit)
    }

    /// Show a failed lookup, and clear it once the same tier loads
    fn report_fetch(&mut self, ticket: &FetchTicket, result: &LocationResult<Vec<Region>>) {
        match result {
            Err(e) => {
                self.status_message = Some(format!("Could not load {} list: {}", ticket.tier, e));
                self.failed_tier = Some(ticket.tier);
            }
            Ok(_) if self.failed_tier == Some(ticket.tier) => {
                self.status_message = None;
                self.failed_tier = None;
            }
            Ok(_) => {}
        }
    }

    fn handle_key_event(&mut self, key_event: KeyEvent) {
        if self.key_map.should_quit(&key_event) {
            self.should_quit = true;
            return;
        }

        if self.key_map.should_show_help(&key_event) {
            self.toggle_help();
            return;
        }

        if self.show_help {
            if key_event.code == KeyCode::Esc {
                self.toggle_help();
            }
            return;
        }

        if key_event.code == KeyCode::Esc && !self.picker.is_open() {
            self.should_quit = true;
            return;
        }

        if let Some(PickerAction::Select(tier, region)) = self.picker.handle_key_event(key_event) {
            match self.resolver.select(tier, region) {
                Ok(step) => {
                    self.status_message = None;
                    self.failed_tier = None;
                    self.commit(step);
                }
                Err(e) => {
                    warn!("Selection rejected: {}", e);
                    self.status_message = Some(e.to_string());
                    self.picker.sync(&self.resolver);
                }
            }
        }
    }

    /// The help overlay takes focus away from the picker while shown
    fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
        self.picker.set_focus(!self.show_help);
    }

    /// Render the application UI
    pub fn render(&mut self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(1),    // Picker
                Constraint::Length(1), // Status bar
            ])
            .split(frame.size());

        self.picker.render(frame, chunks[0], &self.theme);
        self.render_status_bar(frame, chunks[1]);

        if self.show_help {
            self.render_help_overlay(frame);
        }
    }

    /// Render the status bar
    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let status_text = match &self.status_message {
            Some(message) => message.clone(),
            None => match self.form.value(&self.field.label_field) {
                Some(label) => format!("Address: {} | Esc to finish", label),
                None => "No address yet | Ctrl+G for help | Esc to quit".to_string(),
            },
        };

        let status_paragraph = Paragraph::new(status_text).style(self.theme.status_bar_style());
        frame.render_widget(status_paragraph, area);
    }

    /// Render help overlay
    fn render_help_overlay(&self, frame: &mut Frame) {
        let help_area = centered_rect(60, 50, frame.size());

        let help_block = Block::default()
            .borders(Borders::ALL)
            .title("Help")
            .style(self.theme.help_style());

        let help_paragraph = Paragraph::new(self.key_map.help_text())
            .block(help_block)
            .style(self.theme.text_style());

        frame.render_widget(ratatui::widgets::Clear, help_area);
        frame.render_widget(help_paragraph, help_area);
    }
}

/// Create a centered rectangle with given percentage of the screen
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
