//! Player application state and input routing.

use std::time::Duration;

use crossterm::event::{KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use pplayer_engine::{Player, PlayerConfig, PlayerEvent, PointerController};
use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use tracing::info;

use crate::event::{key_to_action, Action};
use crate::player::{label_spans, HandleAnimator, PlayerLayout, ProgressPlayerWidget};
use crate::theme::{IconMode, IconSet, Theme};

/// UI configuration (from environment).
#[derive(Debug, Clone)]
pub struct UiConfig {
    /// Icon mode (Nerd, Unicode, or ASCII).
    pub icons: IconMode,
    /// Color palette.
    pub theme: Theme,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

impl UiConfig {
    /// Create config from environment, respecting `NO_COLOR`.
    ///
    /// `PPLAYER_THEME=latte` selects the light palette.
    pub fn from_env() -> Self {
        if std::env::var("NO_COLOR").is_ok() {
            return Self {
                icons: IconMode::Ascii,
                theme: Theme::high_contrast(),
            };
        }
        let theme = match std::env::var("PPLAYER_THEME").as_deref() {
            Ok("latte") => Theme::latte(),
            _ => Theme::mocha(),
        };
        Self {
            icons: IconMode::Unicode,
            theme,
        }
    }
}

/// Main application state: one player plus its pointer and animation state.
#[derive(Debug)]
pub struct App {
    pub config: PlayerConfig,
    pub player: Player,
    pub pointer: PointerController,
    pub theme: Theme,
    pub icons: IconSet,
    animator: HandleAnimator,
    /// UI clock, advanced by ticks.
    now: Duration,
    /// Layout from the last render, used for hit-testing.
    layout: PlayerLayout,
    /// Human-readable description of the last player event.
    pub last_event: Option<String>,
    /// Should the app quit?
    pub should_quit: bool,
}

impl App {
    /// Create an app for the given player configuration.
    pub fn new(config: PlayerConfig, ui: &UiConfig) -> Self {
        let player = Player::new(&config);
        let animator = HandleAnimator::new(player.handle());
        Self {
            pointer: PointerController::new(config.show_tooltip),
            player,
            config,
            theme: ui.theme.clone(),
            icons: IconSet::new(ui.icons),
            animator,
            now: Duration::ZERO,
            layout: PlayerLayout::default(),
            last_event: None,
            should_quit: false,
        }
    }

    /// Recompute the player layout for the terminal area.
    pub fn resize(&mut self, area: Rect) {
        self.layout = PlayerLayout::compute(player_area(area), &self.config);
        self.pointer.set_bounds(self.layout.track_bounds());
    }

    /// Current player layout.
    pub fn layout(&self) -> PlayerLayout {
        self.layout
    }

    /// Advance playback and animation time.
    pub fn tick(&mut self, elapsed: Duration) {
        self.now += elapsed;
        self.player.advance(elapsed);
        self.sync();
    }

    /// Handle keyboard input.
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        match key_to_action(key) {
            Action::Quit => self.should_quit = true,
            Action::TogglePlay => self.player.toggle(),
            Action::StepForward => {
                self.player.step_forward();
            }
            Action::StepBackward => {
                self.player.step_backward();
            }
            Action::Start => {
                self.player.go_to_start();
            }
            Action::SyncValue(index) => {
                if let Some(value) = self
                    .player
                    .marks()
                    .get(index)
                    .and_then(|m| m.value.clone())
                {
                    self.player.sync_value(&value);
                    self.config.value = Some(value);
                }
            }
            Action::None => {}
        }
        self.sync();
    }

    /// Handle mouse input.
    pub fn handle_mouse_event(&mut self, mouse: MouseEvent) {
        let (col, row) = (mouse.column, mouse.row);
        let (x, y) = (f64::from(col), f64::from(row));

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self.press(col, row),
            MouseEventKind::Drag(MouseButton::Left) => {
                self.pointer.pointer_move(x, &mut self.player);
                self.pointer.hover(x, y, &self.player);
            }
            MouseEventKind::Up(MouseButton::Left) => self.pointer.release(),
            MouseEventKind::Moved => self.pointer.hover(x, y, &self.player),
            _ => {}
        }
        self.sync();
    }

    fn press(&mut self, col: u16, row: u16) {
        let layout = self.layout;
        let position = Position { x: col, y: row };
        if layout.button.is_some_and(|b| b.contains(position)) {
            self.player.toggle();
            return;
        }

        if layout.track.contains(position) {
            let handle_col = layout.column_of(self.animator.position(self.now));
            if col == handle_col {
                self.pointer.press_handle();
            } else {
                self.pointer.click(f64::from(col), &mut self.player);
            }
            return;
        }

        if let Some(strip) = layout.labels.filter(|s| s.contains(position)) {
            let hit = label_spans(strip, self.player.marks(), self.config.label_position)
                .into_iter()
                .rev()
                .find(|span| span.contains(col));
            let target = hit
                .and_then(|span| self.player.marks().get(span.index))
                .map(|mark| mark.percent);
            match target {
                Some(percent) => {
                    self.player.select_mark(percent);
                }
                None => {
                    self.pointer.click(f64::from(col), &mut self.player);
                }
            }
        }
    }

    /// Drain player events and follow the handle target.
    fn sync(&mut self) {
        for event in self.player.take_events() {
            let text = match &event {
                PlayerEvent::Play => "Playing".to_string(),
                PlayerEvent::Pause => "Paused".to_string(),
                PlayerEvent::Trigger(mark) => format!("Selected {}", mark.label),
            };
            info!(event = %text, "Player event");
            self.last_event = Some(text);
        }
        self.animator.retarget(self.player.handle(), self.now);
    }

    /// Displayed handle position.
    pub fn handle_position(&self) -> f64 {
        self.animator.position(self.now)
    }

    /// Render the player and its footer into `area`.
    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        ProgressPlayerWidget::new(&self.player, &self.config, &self.theme, &self.icons)
            .tooltip(self.pointer.tooltip())
            .handle_percent(self.handle_position())
            .render(player_area(area), buf);

        if area.height < 2 {
            return;
        }
        let footer = Rect::new(area.x, area.bottom() - 1, area.width, 1);
        let mut spans = vec![Span::styled(
            "space play/pause · ←/→ step · home start · 1-9 value · q quit",
            Style::default().fg(self.theme.muted),
        )];
        if let Some(event) = &self.last_event {
            spans.push(Span::styled("  │  ", Style::default().fg(self.theme.muted)));
            spans.push(Span::styled(event, Style::default().fg(self.theme.text)));
        }
        Paragraph::new(Line::from(spans)).render(footer, buf);
    }
}

/// Area given to the player: the terminal minus a one-cell margin and the
/// footer row.
fn player_area(area: Rect) -> Rect {
    Rect::new(
        area.x + 1,
        area.y + 1,
        area.width.saturating_sub(2),
        area.height.saturating_sub(3),
    )
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::buffer_to_string;
    use crossterm::event::{KeyCode, KeyModifiers};
    use pplayer_engine::Mark;

    fn app() -> App {
        let mut config = PlayerConfig::with_marks(vec![
            Mark::new(0.0, "Alarm", 2.0).with_value("alarm"),
            Mark::new(50.0, "Rescue", 3.0).with_value("rescue"),
            Mark::new(100.0, "Done", 1.0).with_value("done"),
        ]);
        config.show_tooltip = true;
        let ui = UiConfig {
            icons: IconMode::Ascii,
            theme: Theme::default(),
        };
        let mut app = App::new(config, &ui);
        // Player area: x=1, width 46 -> button 1..5, track 5..47.
        app.resize(Rect::new(0, 0, 48, 8));
        app
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_layout_after_resize() {
        let app = app();
        let layout = app.layout();
        assert_eq!(layout.tooltip, Some(Rect::new(5, 1, 42, 1)));
        assert_eq!(layout.track, Rect::new(5, 2, 42, 1));
        assert_eq!(layout.column_of(50.0), 26);
        assert!(app.pointer.bounds().is_measurable());
    }

    #[test]
    fn test_space_toggles_playback() {
        let mut app = app();
        app.handle_key_event(key(KeyCode::Char(' ')));
        assert!(app.player.is_playing());
        assert_eq!(app.last_event.as_deref(), Some("Selected Alarm"));

        app.tick(Duration::from_secs(2));
        assert_eq!(app.player.current_percent(), 50.0);
        assert_eq!(app.last_event.as_deref(), Some("Selected Rescue"));

        app.handle_key_event(key(KeyCode::Char(' ')));
        assert!(!app.player.is_playing());
        assert_eq!(app.last_event.as_deref(), Some("Paused"));
    }

    #[test]
    fn test_button_click_toggles() {
        let mut app = app();
        app.handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Left), 2, 2));
        assert!(app.player.is_playing());
    }

    #[test]
    fn test_press_outside_player_ignored() {
        let mut app = app();
        // One column past the track's right edge, and the margin row above.
        app.handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Left), 47, 2));
        app.handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Left), 26, 0));
        assert_eq!(app.player.current_percent(), 0.0);
        assert!(!app.player.is_playing());
        assert!(!app.pointer.is_dragging());
    }

    #[test]
    fn test_track_click_seeks() {
        let mut app = app();
        app.handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Left), 40, 2));
        assert_eq!(app.player.current_percent(), 100.0);
        assert!(!app.pointer.is_dragging());
    }

    #[test]
    fn test_drag_from_handle() {
        let mut app = app();
        app.handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Left), 5, 2));
        assert!(app.pointer.is_dragging());

        app.handle_mouse_event(mouse(MouseEventKind::Drag(MouseButton::Left), 27, 2));
        assert_eq!(app.player.current_percent(), 50.0);
        assert_eq!(app.handle_position(), 50.0);

        // Dragging past the right edge pins the handle.
        app.handle_mouse_event(mouse(MouseEventKind::Drag(MouseButton::Left), 60, 9));
        assert_eq!(app.handle_position(), 100.0);
        assert_eq!(app.player.current_percent(), 50.0);

        app.handle_mouse_event(mouse(MouseEventKind::Up(MouseButton::Left), 60, 9));
        assert!(!app.pointer.is_dragging());
    }

    #[test]
    fn test_label_click_selects() {
        let mut app = app();
        // "Done" is clamped against the track end on the label row.
        app.handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Left), 45, 3));
        assert_eq!(app.player.current_percent(), 100.0);
        assert_eq!(app.player.selected(), Some(2));
    }

    #[test]
    fn test_hover_tooltip() {
        let mut app = app();
        app.handle_mouse_event(mouse(MouseEventKind::Moved, 26, 3));
        assert_eq!(
            app.pointer.tooltip().map(|t| t.text.as_str()),
            Some("Rescue")
        );
        app.handle_mouse_event(mouse(MouseEventKind::Moved, 26, 7));
        assert!(app.pointer.tooltip().is_none());
    }

    #[test]
    fn test_value_sync_key() {
        let mut app = app();
        app.handle_key_event(key(KeyCode::Char('2')));
        assert_eq!(app.player.current_percent(), 50.0);
        assert_eq!(app.last_event, None);
        assert_eq!(app.config.value, Some("rescue".into()));

        // Mid-transition the handle is between the old and new position.
        app.tick(Duration::from_millis(250));
        let position = app.handle_position();
        assert!(position > 0.0 && position < 50.0);
        app.tick(Duration::from_millis(250));
        assert_eq!(app.handle_position(), 50.0);
    }

    #[test]
    fn test_step_keys() {
        let mut app = app();
        app.handle_key_event(key(KeyCode::Right));
        assert_eq!(app.player.current_percent(), 50.0);
        app.handle_key_event(key(KeyCode::Left));
        assert_eq!(app.player.current_percent(), 0.0);
        app.handle_key_event(key(KeyCode::Char('q')));
        assert!(app.should_quit);
    }

    #[test]
    fn test_render_footer() {
        let mut app = app();
        app.handle_key_event(key(KeyCode::Right));
        let area = Rect::new(0, 0, 100, 8);
        app.resize(area);
        let mut buf = Buffer::empty(area);
        app.render(area, &mut buf);
        let out = buffer_to_string(&buf);
        let footer = out.lines().last().unwrap_or_default();
        assert!(footer.contains("q quit"));
        assert!(footer.ends_with("Selected Rescue"));
    }
}
