use crossterm::event::{Event as CrosstermEvent, KeyEvent, KeyEventKind};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::warn;

use crate::location::{FetchTicket, LocationResult, Region};

/// Application events
#[derive(Debug)]
pub enum Event {
    /// Keyboard input event
    Key(KeyEvent),

    /// Terminal resize event
    Resize(u16, u16),

    /// Periodic tick event
    Tick,

    /// A tier lookup finished
    Fetched {
        ticket: FetchTicket,
        result: LocationResult<Vec<Region>>,
    },
}

/// Event handler for managing input events
pub struct EventHandler {
    /// Event receiver channel
    receiver: mpsc::UnboundedReceiver<Event>,

    /// Event sender channel
    sender: mpsc::UnboundedSender<Event>,
}

impl EventHandler {
    /// Create a new event handler and start reading terminal input
    pub fn new(tick_interval: Duration) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();

        let input = sender.clone();
        std::thread::spawn(move || read_terminal(input, tick_interval));

        Self { receiver, sender }
    }

    /// Get the next event
    pub async fn next(&mut self) -> Option<Event> {
        self.receiver.recv().await
    }

    /// Get a clone of the sender
    pub fn sender(&self) -> mpsc::UnboundedSender<Event> {
        self.sender.clone()
    }
}

/// Forward crossterm events until the receiving side goes away
fn read_terminal(sender: mpsc::UnboundedSender<Event>, tick_interval: Duration) {
    loop {
        let event = match crossterm::event::poll(tick_interval) {
            Ok(true) => match crossterm::event::read() {
                Ok(event) => convert_crossterm_event(event),
                Err(e) => {
                    warn!("Failed to read terminal event: {}", e);
                    return;
                }
            },
            Ok(false) => Some(Event::Tick),
            Err(e) => {
                warn!("Failed to poll terminal events: {}", e);
                return;
            }
        };

        if let Some(event) = event {
            if sender.send(event).is_err() {
                return;
            }
        }
    }
}

/// Convert crossterm events to application events
fn convert_crossterm_event(event: CrosstermEvent) -> Option<Event> {
    match event {
        CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Some(Event::Key(key)),
        CrosstermEvent::Resize(width, height) => Some(Event::Resize(width, height)),
        _ => None,
    }
}
