//! Progress player widget.

use pplayer_engine::{Player, PlayerConfig, Tooltip};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};
use unicode_width::UnicodeWidthStr;

use super::layout::{label_spans, PlayerLayout};
use crate::theme::{IconSet, Theme};

/// Renders a player's visual state: button, track, labels and tooltip.
pub struct ProgressPlayerWidget<'a> {
    player: &'a Player,
    config: &'a PlayerConfig,
    theme: &'a Theme,
    icons: &'a IconSet,
    tooltip: Option<&'a Tooltip>,
    /// Displayed handle position; defaults to the engine's target.
    handle_percent: Option<f64>,
}

impl<'a> ProgressPlayerWidget<'a> {
    /// Create a new player widget.
    pub fn new(
        player: &'a Player,
        config: &'a PlayerConfig,
        theme: &'a Theme,
        icons: &'a IconSet,
    ) -> Self {
        Self {
            player,
            config,
            theme,
            icons,
            tooltip: None,
            handle_percent: None,
        }
    }

    /// Set the tooltip to draw.
    #[must_use]
    pub fn tooltip(mut self, tooltip: Option<&'a Tooltip>) -> Self {
        self.tooltip = tooltip;
        self
    }

    /// Override the displayed handle position (e.g. mid-animation).
    #[must_use]
    pub fn handle_percent(mut self, percent: f64) -> Self {
        self.handle_percent = Some(percent);
        self
    }

    fn button_icon(&self) -> &'a str {
        if self.player.is_playing() {
            self.config
                .pause_icon
                .as_deref()
                .unwrap_or_else(|| self.icons.pause())
        } else {
            self.config
                .play_icon
                .as_deref()
                .unwrap_or_else(|| self.icons.play())
        }
    }

    fn render_track(&self, layout: &PlayerLayout, buf: &mut Buffer) {
        let track = layout.track;
        if track.width == 0 {
            return;
        }
        let handle_percent = self
            .handle_percent
            .unwrap_or_else(|| self.player.handle().percent);
        let handle_col = layout.column_of(handle_percent);

        for x in track.left()..track.right() {
            let (symbol, color) = if x <= handle_col {
                (self.icons.fill(), self.theme.fill)
            } else {
                (self.icons.track(), self.theme.track)
            };
            buf.set_string(x, track.y, symbol, Style::default().fg(color));
        }

        for (index, mark) in self.player.marks().marks().iter().enumerate() {
            let x = layout.column_of(mark.percent);
            let style = if self.player.selected() == Some(index) {
                Style::default()
                    .fg(self.theme.primary)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(self.theme.subtext)
            };
            buf.set_string(x, track.y, self.icons.mark(), style);
        }

        buf.set_string(
            handle_col,
            track.y,
            self.icons.handle(),
            Style::default().fg(self.theme.handle),
        );
    }

    fn render_labels(&self, strip: Rect, buf: &mut Buffer) {
        let marks = self.player.marks();
        for span in label_spans(strip, marks, self.config.label_position) {
            let Some(mark) = marks.get(span.index) else {
                continue;
            };
            let style = if self.player.selected() == Some(span.index) {
                Style::default()
                    .fg(self.theme.primary)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(self.theme.subtext)
            };
            buf.set_stringn(span.x, strip.y, &mark.label, span.width as usize, style);
        }
    }

    fn render_tooltip(&self, strip: Rect, buf: &mut Buffer) {
        let Some(tooltip) = self.tooltip else {
            return;
        };
        if strip.width == 0 || !tooltip.offset.is_finite() {
            return;
        }
        let width = (tooltip.text.width() as u16).min(strip.width);
        let anchor = strip.x + (tooltip.offset.max(0.0).round() as u16).min(strip.width - 1);
        let x = anchor
            .saturating_sub(width / 2)
            .clamp(strip.x, strip.right().saturating_sub(width).max(strip.x));
        buf.set_stringn(
            x,
            strip.y,
            &tooltip.text,
            width as usize,
            Style::default().fg(self.theme.base).bg(self.theme.secondary),
        );
    }
}

impl Widget for ProgressPlayerWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let layout = PlayerLayout::compute(area, self.config);

        if let Some(button) = layout.button {
            let style = if self.player.is_playing() {
                Style::default().fg(self.theme.handle)
            } else {
                Style::default().fg(self.theme.primary)
            };
            buf.set_stringn(
                button.x + 1,
                button.y,
                self.button_icon(),
                button.width.saturating_sub(1) as usize,
                style,
            );
        }

        self.render_track(&layout, buf);

        if let Some(strip) = layout.labels {
            self.render_labels(strip, buf);
        }
        if let Some(strip) = layout.tooltip {
            self.render_tooltip(strip, buf);
        }
    }
}
