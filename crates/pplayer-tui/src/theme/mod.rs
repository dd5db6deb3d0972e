//! Theme components for the TUI.
//!
//! This module provides:
//! - [`Theme`] - Color palette (Catppuccin Mocha/Latte/High Contrast)
//! - [`IconSet`] - Player glyphs with Nerd/Unicode/ASCII modes

mod colors;
mod icons;

pub use colors::Theme;
pub use icons::{IconMode, IconSet};
