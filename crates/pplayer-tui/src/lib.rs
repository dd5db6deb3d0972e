//! pplayer-tui: Terminal UI for the progress player
//!
//! This crate renders a [`pplayer_engine::Player`] with ratatui and routes
//! terminal keyboard and mouse input into it:
//! - Play/pause button, track with marks and an eased seek handle
//! - Mark labels and an optional hover tooltip
//! - A virtual clock driven by the event loop's ticks

mod app;
mod event;
mod input;
mod player;
#[cfg(test)]
pub mod test_utils;
mod theme;

pub use app::{App, UiConfig};
pub use event::{key_to_action, Action, Event, EventHandler};
pub use input::InputSubscription;
pub use player::{
    label_spans, percent_to_column, HandleAnimator, LabelSpan, PlayerLayout, ProgressPlayerWidget,
    BUTTON_WIDTH,
};
pub use pplayer_engine;
pub use theme::{IconMode, IconSet, Theme};

use crossterm::{
    cursor::Show as ShowCursor,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use pplayer_engine::{ConfigError, PlayerConfig};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, stdout};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

/// Tick interval of the event loop, in milliseconds.
const TICK_RATE_MS: u64 = 50;

/// Errors that can occur while running the TUI.
#[derive(Error, Debug)]
pub enum TuiError {
    #[error("terminal error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// RAII guard for terminal state restoration.
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(stdout(), LeaveAlternateScreen, ShowCursor);
    }
}

/// Load a player configuration file and run it.
pub async fn run_config_file(path: &Path, ui: UiConfig) -> Result<(), TuiError> {
    let config = PlayerConfig::load(path)?;
    info!(path = %path.display(), marks = config.marks.len(), "Loaded player config");
    run_player(config, ui).await
}

/// Run the player TUI.
///
/// Sets up the terminal, runs the event loop, and restores the terminal on
/// exit.
pub async fn run_player(config: PlayerConfig, ui: UiConfig) -> Result<(), TuiError> {
    // Setup terminal with RAII guard for cleanup
    enable_raw_mode()?;
    let _guard = TerminalGuard;

    let mut out = stdout();
    execute!(out, EnterAlternateScreen)?;
    let _input = InputSubscription::acquire(stdout())?;
    let backend = CrosstermBackend::new(out);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config, &ui);
    let mut events = EventHandler::new(TICK_RATE_MS);

    let result = run_loop(&mut terminal, &mut app, &mut events).await;

    // Restore cursor before guard drops
    terminal.show_cursor()?;

    result
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &mut EventHandler,
) -> Result<(), TuiError> {
    loop {
        terminal.draw(|frame| {
            let area = frame.area();
            app.resize(area);
            app.render(area, frame.buffer_mut());
        })?;

        let Some(event) = events.next().await else {
            break;
        };
        match event {
            Event::Key(key) => app.handle_key_event(key),
            Event::Mouse(mouse) => app.handle_mouse_event(mouse),
            Event::Tick(elapsed) => app.tick(elapsed),
            Event::Resize(width, height) => debug!(width, height, "Terminal resized"),
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
