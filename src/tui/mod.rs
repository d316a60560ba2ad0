//! Terminal User Interface module using ratatui

mod app;
mod components;
mod events;
mod keys;
mod styles;

pub use app::App;
pub use events::{Event, EventHandler};

use anyhow::Result;
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::location::{LocationField, LocationLookup, MemoryForm};
use crate::pagination::PaginationConfig;

pub type Backend = CrosstermBackend<io::Stdout>;
pub type Frame<'a> = ratatui::Frame<'a>;

/// Initialize the terminal for TUI mode
pub fn init_terminal() -> Result<Terminal<Backend>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to normal mode
pub fn restore_terminal(terminal: &mut Terminal<Backend>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Run the address picker until the user leaves it; returns the form with
/// whatever was published into it
pub async fn run_picker(
    lookup: Arc<dyn LocationLookup>,
    form: MemoryForm,
    field: LocationField,
    pagination: PaginationConfig,
) -> Result<MemoryForm> {
    let mut event_handler = EventHandler::new(Duration::from_millis(250));
    let mut app = App::new(lookup, form, field, pagination, event_handler.sender());

    let mut terminal = init_terminal()?;
    app.start();
    let result = run_app(&mut terminal, &mut app, &mut event_handler).await;
    restore_terminal(&mut terminal)?;
    result?;

    info!("Picker closed");
    Ok(app.into_form())
}

/// Main application loop
async fn run_app(
    terminal: &mut Terminal<Backend>,
    app: &mut App,
    event_handler: &mut EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| app.render(frame))?;

        match event_handler.next().await {
            Some(event) => {
                if app.handle_event(event)? {
                    break; // Exit requested
                }
            }
            None => break,
        }
    }
    Ok(())
}
