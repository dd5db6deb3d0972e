//! Event handling for the player TUI.

use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyModifiers, MouseEvent};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// Events that can occur in the TUI.
#[derive(Debug, Clone)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// A mouse event occurred.
    Mouse(MouseEvent),
    /// Time passed since the previous tick.
    Tick(Duration),
    /// Terminal was resized.
    Resize(u16, u16),
}

/// Event handler that runs in a background thread.
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
    _tx: mpsc::UnboundedSender<Event>,
}

impl EventHandler {
    /// Create a new event handler with the specified tick rate.
    pub fn new(tick_rate_ms: u64) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let tx_clone = tx.clone();

        // Spawn blocking thread for event polling (crossterm uses blocking I/O)
        std::thread::spawn(move || {
            let tick_rate = Duration::from_millis(tick_rate_ms);
            let mut last_tick = Instant::now();
            loop {
                let timeout = tick_rate.saturating_sub(last_tick.elapsed());
                if event::poll(timeout).unwrap_or(false) {
                    if let Ok(evt) = event::read() {
                        let event = match evt {
                            CrosstermEvent::Key(key) => Some(Event::Key(key)),
                            CrosstermEvent::Mouse(mouse) => Some(Event::Mouse(mouse)),
                            CrosstermEvent::Resize(w, h) => Some(Event::Resize(w, h)),
                            _ => None,
                        };
                        if let Some(e) = event {
                            if tx_clone.send(e).is_err() {
                                break;
                            }
                        }
                    }
                }
                if last_tick.elapsed() >= tick_rate {
                    let elapsed = last_tick.elapsed();
                    last_tick = Instant::now();
                    if tx_clone.send(Event::Tick(elapsed)).is_err() {
                        break;
                    }
                }
            }
        });

        Self { rx, _tx: tx }
    }

    /// Get the next event, blocking until one is available.
    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}

/// Key action that can be performed in the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    TogglePlay,
    StepForward,
    StepBackward,
    Start,
    /// Set the external selected value to the value of the nth mark.
    SyncValue(usize),
    None,
}

/// Convert a key event to an action.
pub fn key_to_action(key: KeyEvent) -> Action {
    // Check for Ctrl+C first
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Action::Quit;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        KeyCode::Char(' ') | KeyCode::Enter => Action::TogglePlay,
        KeyCode::Right | KeyCode::Char('l') => Action::StepForward,
        KeyCode::Left | KeyCode::Char('h') => Action::StepBackward,
        KeyCode::Home | KeyCode::Char('0') => Action::Start,
        KeyCode::Char(c @ '1'..='9') => Action::SyncValue(c as usize - '1' as usize),
        _ => Action::None,
    }
}
