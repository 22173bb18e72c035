//! Theme system for consistent UI colors across dark and light modes.

use ratatui::style::Color;

use crate::config::ThemeMode;

/// Semantic color theme for the TUI.
///
/// Provides consistent colors across all UI components with support for
/// both dark and light terminal backgrounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Primary color for borders, titles, and emphasis
    pub primary: Color,
    /// Accent color for highlights, selections, and active keys
    pub accent: Color,
    /// Error state color for errors and rejected switches
    pub error: Color,

    /// Primary text content color
    pub text: Color,
    /// Muted text color for help text and dim content
    pub text_muted: Color,

    /// Main background color
    pub background: Color,
    /// Surface color for panels and popups
    pub surface: Color,

    /// Color for keys that carry documentation
    pub documented: Color,
}

impl Theme {
    /// Detects the OS theme and returns the appropriate Theme.
    #[must_use]
    pub fn detect() -> Self {
        match dark_light::detect() {
            dark_light::Mode::Light => Self::light(),
            // Fall back to dark theme for dark mode or unspecified
            dark_light::Mode::Dark | dark_light::Mode::Default => Self::dark(),
        }
    }

    /// Resolves a theme from the configured mode.
    #[must_use]
    pub fn from_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Auto => Self::detect(),
            ThemeMode::Dark => Self::dark(),
            ThemeMode::Light => Self::light(),
        }
    }

    /// Creates a dark theme optimized for dark terminal backgrounds.
    #[must_use]
    pub const fn dark() -> Self {
        Self {
            primary: Color::Cyan,
            accent: Color::Yellow,
            error: Color::Red,

            text: Color::White,
            text_muted: Color::DarkGray,

            background: Color::Black,
            surface: Color::Rgb(30, 30, 30),

            documented: Color::Green,
        }
    }

    /// Creates a light theme optimized for light terminal backgrounds.
    #[must_use]
    pub const fn light() -> Self {
        Self {
            primary: Color::Blue,
            accent: Color::Rgb(180, 100, 0), // Dark orange for visibility
            error: Color::Red,

            text: Color::Black,
            text_muted: Color::Gray,

            background: Color::White,
            surface: Color::Rgb(245, 245, 245),

            documented: Color::Rgb(0, 128, 0), // Dark green
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::detect()
    }
}
