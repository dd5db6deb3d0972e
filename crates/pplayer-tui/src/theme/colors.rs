//! Catppuccin color palettes for the player.

use ratatui::style::Color;

/// Theme color palette.
#[derive(Debug, Clone)]
pub struct Theme {
    // Background
    pub base: Color,

    // Foregrounds
    pub text: Color,
    pub subtext: Color,
    pub muted: Color,

    // Accents
    pub primary: Color,
    pub secondary: Color,

    // Track
    pub track: Color,
    pub fill: Color,
    pub handle: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::mocha()
    }
}

impl Theme {
    /// Catppuccin Mocha theme (default dark theme).
    pub fn mocha() -> Self {
        Self {
            // Background
            base: Color::Rgb(30, 30, 46),    // #1e1e2e

            // Foregrounds
            text: Color::Rgb(205, 214, 244),    // #cdd6f4
            subtext: Color::Rgb(166, 173, 200), // #a6adc8
            muted: Color::Rgb(108, 112, 134),   // #6c7086

            // Accents
            primary: Color::Rgb(180, 190, 254),   // #b4befe (lavender)
            secondary: Color::Rgb(148, 226, 213), // #94e2d5 (teal)

            // Track
            track: Color::Rgb(69, 71, 90),    // #45475a
            fill: Color::Rgb(137, 180, 250),  // #89b4fa (blue)
            handle: Color::Rgb(250, 179, 135), // #fab387 (peach)
        }
    }

    /// Catppuccin Latte theme (light theme).
    pub fn latte() -> Self {
        Self {
            // Background (light)
            base: Color::Rgb(239, 241, 245),    // #eff1f5

            // Foregrounds
            text: Color::Rgb(76, 79, 105),    // #4c4f69
            subtext: Color::Rgb(92, 95, 119), // #5c5f77
            muted: Color::Rgb(140, 143, 161), // #8c8fa1

            // Accents
            primary: Color::Rgb(114, 135, 253), // #7287fd (lavender)
            secondary: Color::Rgb(23, 146, 153), // #179299 (teal)

            // Track
            track: Color::Rgb(188, 192, 204), // #bcc0cc
            fill: Color::Rgb(30, 102, 245),   // #1e66f5 (blue)
            handle: Color::Rgb(254, 100, 11), // #fe640b (peach)
        }
    }

    /// High contrast theme for accessibility.
    pub fn high_contrast() -> Self {
        Self {
            base: Color::Black,

            text: Color::White,
            subtext: Color::Rgb(200, 200, 200),
            muted: Color::Rgb(150, 150, 150),

            primary: Color::Cyan,
            secondary: Color::Magenta,

            track: Color::White,
            fill: Color::Cyan,
            handle: Color::Yellow,
        }
    }
}
