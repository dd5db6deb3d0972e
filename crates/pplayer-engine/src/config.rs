//! Configuration types for the progress player.
//!
//! This module defines the player's configuration surface: the marks, the
//! layout options and the external selected value.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::mark::{Mark, MarkValue};

/// Main configuration for a player instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Ordered marks. Sequence order defines play and seek traversal.
    pub marks: Vec<Mark>,

    /// Total width of the player.
    #[serde(default = "default_width")]
    pub width: Dimension,

    /// Height of the player.
    #[serde(default = "default_height")]
    pub height: Dimension,

    /// Whether the play/pause button is shown.
    #[serde(default = "default_true")]
    pub show_play_button: bool,

    /// Whether the handle returns to the first mark when playback finishes.
    #[serde(default = "default_true")]
    pub finish_to_start: bool,

    /// Space marks evenly by index instead of using declared percents.
    #[serde(default)]
    pub distance_average: bool,

    /// Horizontal anchor of each label relative to its mark.
    #[serde(default)]
    pub label_position: LabelPosition,

    /// External selected value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<MarkValue>,

    /// Show a tooltip with the hovered mark's label.
    #[serde(default)]
    pub show_tooltip: bool,

    /// Glyph shown on the button while paused.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub play_icon: Option<String>,

    /// Glyph shown on the button while playing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pause_icon: Option<String>,
}

fn default_true() -> bool {
    true
}

fn default_width() -> Dimension {
    Dimension::Relative("100%".into())
}

fn default_height() -> Dimension {
    Dimension::Cells(4)
}

/// Horizontal anchor of a label relative to its mark position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LabelPosition {
    /// Label starts at the mark.
    Left,
    /// Label is centred on the mark.
    #[default]
    Middle,
    /// Label ends at the mark.
    Right,
}

/// A size given either in terminal cells or as a percentage string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Dimension {
    /// Absolute size in cells.
    Cells(u16),
    /// Size relative to the available space, e.g. `"80%"`, or a bare cell
    /// count written as a string, e.g. `"60"`.
    Relative(String),
}

impl Dimension {
    /// Resolve against the available space, never exceeding it.
    pub fn resolve(&self, available: u16) -> Result<u16, ConfigError> {
        let resolved = match self {
            Self::Cells(cells) => *cells,
            Self::Relative(raw) => {
                let raw = raw.trim();
                if let Some(pct) = raw.strip_suffix('%') {
                    let pct: f64 = pct
                        .trim()
                        .parse()
                        .map_err(|_| ConfigError::InvalidDimension(raw.to_string()))?;
                    if !pct.is_finite() || pct < 0.0 {
                        return Err(ConfigError::InvalidDimension(raw.to_string()));
                    }
                    (f64::from(available) * pct / 100.0).floor() as u16
                } else {
                    raw.trim_end_matches("px")
                        .trim()
                        .parse()
                        .map_err(|_| ConfigError::InvalidDimension(raw.to_string()))?
                }
            }
        };
        Ok(resolved.min(available))
    }
}

impl PlayerConfig {
    /// Create a configuration with default options for the given marks.
    pub fn with_marks(marks: Vec<Mark>) -> Self {
        Self {
            marks,
            ..Default::default()
        }
    }

    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        let config: Self = serde_json::from_str(&content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigError::Io)?;
        }
        std::fs::write(path, content).map_err(ConfigError::Io)
    }

    /// Reject marks that cannot be placed or timed.
    ///
    /// Empty mark lists and duplicate percents are accepted.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (index, mark) in self.marks.iter().enumerate() {
            if !self.distance_average && !(0.0..=100.0).contains(&mark.percent) {
                return Err(ConfigError::InvalidMark {
                    index,
                    reason: format!("percent {} is outside 0-100", mark.percent),
                });
            }
            if !mark.time.is_finite() || mark.time < 0.0 {
                return Err(ConfigError::InvalidMark {
                    index,
                    reason: format!("dwell time {} must be a non-negative number", mark.time),
                });
            }
        }
        Ok(())
    }

    /// The four-stop incident timeline used by `pplayer demo`.
    pub fn demo() -> Self {
        Self::with_marks(vec![
            Mark::new(0.0, "Alarm", 2.0).with_value("alarm"),
            Mark::new(10.0, "Dispatch", 2.0).with_value("dispatch"),
            Mark::new(60.0, "Rescue", 4.0).with_value("rescue"),
            Mark::new(100.0, "Done", 3.0).with_value("done"),
        ])
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            marks: Vec::new(),
            width: default_width(),
            height: default_height(),
            show_play_button: true,
            finish_to_start: true,
            distance_average: false,
            label_position: LabelPosition::default(),
            value: None,
            show_tooltip: false,
            play_icon: None,
            pause_icon: None,
        }
    }
}

/// Errors that can occur when working with configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error reading or writing config.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing config JSON.
    #[error("Parse error: {0}")]
    Parse(#[source] serde_json::Error),

    /// Error serializing config to JSON.
    #[error("Serialize error: {0}")]
    Serialize(#[source] serde_json::Error),

    /// A width or height could not be understood.
    #[error("Invalid dimension: {0:?}")]
    InvalidDimension(String),

    /// A mark has an unusable position or dwell time.
    #[error("Invalid mark #{index}: {reason}")]
    InvalidMark { index: usize, reason: String },
}
