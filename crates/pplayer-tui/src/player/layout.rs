//! Layout of the player inside a terminal area.
//!
//! ```text
//!      [tooltip]            <- only with show_tooltip
//!  ▶  ━━━━━━━┼━━━●─────┼    <- button + track
//!     Alarm  Dispatch  Done <- labels
//! ```
//!
//! Track bounds are expressed in cell coordinates with inclusive edges: the
//! first track cell is 0% and the last is 100%.

use pplayer_engine::{LabelPosition, MarkSet, PlayerConfig, TrackBounds};
use ratatui::layout::Rect;
use unicode_width::UnicodeWidthStr;

/// Columns reserved for the play/pause button.
pub const BUTTON_WIDTH: u16 = 4;

/// Resolved areas of one player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlayerLayout {
    /// Play/pause button, if shown.
    pub button: Option<Rect>,
    /// Single-row track.
    pub track: Rect,
    /// Single-row label strip under the track.
    pub labels: Option<Rect>,
    /// Single-row tooltip strip above the track.
    pub tooltip: Option<Rect>,
}

impl PlayerLayout {
    /// Lay out a player within `area`.
    ///
    /// Width and height come from the configuration; a dimension that cannot
    /// be resolved falls back to the whole area.
    pub fn compute(area: Rect, config: &PlayerConfig) -> Self {
        let width = config.width.resolve(area.width).unwrap_or(area.width);
        let height = config.height.resolve(area.height).unwrap_or(area.height);
        let area = Rect::new(area.x, area.y, width, height);

        if area.width == 0 || area.height == 0 {
            return Self::default();
        }

        let mut y = area.y;
        let tooltip = if config.show_tooltip && area.height >= 3 {
            y += 1;
            Some(Rect::new(area.x, area.y, area.width, 1))
        } else {
            None
        };

        let (button, track_x) = if config.show_play_button && area.width > BUTTON_WIDTH {
            (
                Some(Rect::new(area.x, y, BUTTON_WIDTH, 1)),
                area.x + BUTTON_WIDTH,
            )
        } else {
            (None, area.x)
        };

        let track_width = area.right().saturating_sub(track_x);
        let track = Rect::new(track_x, y, track_width, 1);
        let labels = (y + 1 < area.bottom()).then(|| Rect::new(track_x, y + 1, track_width, 1));
        let tooltip = tooltip.map(|tip| Rect::new(track_x, tip.y, track_width, 1));

        Self {
            button,
            track,
            labels,
            tooltip,
        }
    }

    /// Bounding box used for hit-testing: the track and its labels.
    pub fn track_bounds(&self) -> TrackBounds {
        let rows = if self.labels.is_some() { 1.0 } else { 0.0 };
        TrackBounds::new(
            f64::from(self.track.x),
            f64::from(self.track.y),
            f64::from(self.track.width.saturating_sub(1)),
            rows,
        )
    }

    /// Column of a percent position on the track.
    pub fn column_of(&self, percent: f64) -> u16 {
        percent_to_column(self.track, percent)
    }
}

/// Map a percent position to a track column.
pub fn percent_to_column(track: Rect, percent: f64) -> u16 {
    let span = f64::from(track.width.saturating_sub(1));
    let percent = if percent.is_finite() {
        percent.clamp(0.0, 100.0)
    } else {
        0.0
    };
    track.x + (percent / 100.0 * span).round() as u16
}

/// Placement of one label on the label strip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelSpan {
    /// Sequence index of the mark.
    pub index: usize,
    /// First column.
    pub x: u16,
    /// Width in columns.
    pub width: u16,
}

impl LabelSpan {
    /// Check if a column falls on the label.
    pub fn contains(&self, column: u16) -> bool {
        column >= self.x && column < self.x + self.width
    }
}

/// Place the visible labels of `marks` on `strip`, anchored per `position`.
///
/// Labels are clamped to the strip; later labels are drawn over earlier ones.
pub fn label_spans(strip: Rect, marks: &MarkSet, position: LabelPosition) -> Vec<LabelSpan> {
    if strip.width == 0 {
        return Vec::new();
    }
    marks
        .marks()
        .iter()
        .enumerate()
        .filter(|(_, mark)| mark.show_label && !mark.label.is_empty())
        .map(|(index, mark)| {
            let width = (mark.label.width() as u16).min(strip.width);
            let anchor = percent_to_column(strip, mark.percent);
            let start = match position {
                LabelPosition::Left => anchor,
                LabelPosition::Middle => anchor.saturating_sub(width / 2),
                LabelPosition::Right => (anchor + 1).saturating_sub(width),
            };
            let max_start = strip.right().saturating_sub(width);
            LabelSpan {
                index,
                x: start.clamp(strip.x, max_start.max(strip.x)),
                width,
            }
        })
        .collect()
}
