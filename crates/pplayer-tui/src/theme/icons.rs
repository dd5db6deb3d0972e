//! Player glyphs for Nerd Fonts, Unicode, and ASCII fallback.

/// Icon mode configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IconMode {
    /// Nerd Font icons.
    Nerd,
    /// Standard Unicode symbols (default, wide compatibility).
    #[default]
    Unicode,
    /// ASCII-only fallback (maximum compatibility, also used with `NO_COLOR`).
    Ascii,
}

/// Icon set based on configured mode.
#[derive(Debug, Clone, Default)]
pub struct IconSet {
    mode: IconMode,
}

impl IconSet {
    /// Create a new icon set with the specified mode.
    pub fn new(mode: IconMode) -> Self {
        Self { mode }
    }

    /// Get the current icon mode.
    pub fn mode(&self) -> IconMode {
        self.mode
    }

    // === Button ===

    pub fn play(&self) -> &'static str {
        match self.mode {
            IconMode::Nerd => "󰐊",
            IconMode::Unicode => "▶",
            IconMode::Ascii => ">",
        }
    }

    pub fn pause(&self) -> &'static str {
        match self.mode {
            IconMode::Nerd => "󰏤",
            IconMode::Unicode => "⏸",
            IconMode::Ascii => "=",
        }
    }

    // === Track ===

    pub fn track(&self) -> &'static str {
        match self.mode {
            IconMode::Nerd | IconMode::Unicode => "─",
            IconMode::Ascii => "-",
        }
    }

    pub fn fill(&self) -> &'static str {
        match self.mode {
            IconMode::Nerd | IconMode::Unicode => "━",
            IconMode::Ascii => "=",
        }
    }

    pub fn mark(&self) -> &'static str {
        match self.mode {
            IconMode::Nerd | IconMode::Unicode => "┼",
            IconMode::Ascii => "+",
        }
    }

    pub fn handle(&self) -> &'static str {
        match self.mode {
            IconMode::Nerd => "󰝥",
            IconMode::Unicode => "●",
            IconMode::Ascii => "O",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_mode_is_unicode() {
        assert_eq!(IconSet::default().mode(), IconMode::Unicode);
    }

    #[test]
    fn test_ascii_glyphs_are_ascii() {
        let icons = IconSet::new(IconMode::Ascii);
        for glyph in [
            icons.play(),
            icons.pause(),
            icons.track(),
            icons.fill(),
            icons.mark(),
            icons.handle(),
        ] {
            assert!(glyph.is_ascii(), "{glyph} is not ascii");
        }
    }

    #[test]
    fn test_play_and_pause_differ() {
        for mode in [IconMode::Nerd, IconMode::Unicode, IconMode::Ascii] {
            let icons = IconSet::new(mode);
            assert_ne!(icons.play(), icons.pause());
        }
    }
}
