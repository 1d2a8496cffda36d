//! Theme and styling configuration.
//!
//! The active theme is chosen once at startup from the `settings.theme`
//! config value and read everywhere through [`theme()`].

use std::sync::OnceLock;

use ratatui::style::{Color, Modifier, Style};
use tracing::warn;

static THEME: OnceLock<Theme> = OnceLock::new();

/// Color theme for the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Theme name as used in the config file.
    pub name: &'static str,
    /// Primary foreground color.
    pub fg: Color,
    /// Titles, headers and focused elements.
    pub accent: Color,
    /// Confirmations.
    pub success: Color,
    /// Validation problems.
    pub warning: Color,
    /// Load and submission failures.
    pub error: Color,
    /// Secondary text.
    pub dim: Color,
    /// Unfocused borders.
    pub border: Color,
    /// Focused borders.
    pub border_focused: Color,
    /// Text typed into inputs.
    pub input_fg: Color,
    /// Placeholder text in empty inputs.
    pub input_placeholder: Color,
    /// Foreground of the selected table row.
    pub selection_fg: Color,
    /// Background of the selected table row.
    pub selection_bg: Color,
}

impl Theme {
    /// The default dark theme.
    pub fn dark() -> Self {
        Self {
            name: "dark",
            fg: Color::White,
            accent: Color::Cyan,
            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
            dim: Color::DarkGray,
            border: Color::Gray,
            border_focused: Color::Cyan,
            input_fg: Color::White,
            input_placeholder: Color::DarkGray,
            selection_fg: Color::Black,
            selection_bg: Color::Cyan,
        }
    }

    /// A theme for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            name: "light",
            fg: Color::Black,
            accent: Color::Blue,
            success: Color::Green,
            warning: Color::Rgb(180, 110, 0),
            error: Color::Red,
            dim: Color::Gray,
            border: Color::DarkGray,
            border_focused: Color::Blue,
            input_fg: Color::Black,
            input_placeholder: Color::Gray,
            selection_fg: Color::White,
            selection_bg: Color::Blue,
        }
    }

    /// Look up a theme by name.
    pub fn by_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "dark" => Some(Self::dark()),
            "light" => Some(Self::light()),
            _ => None,
        }
    }

    /// Style for table headers.
    pub fn header_style(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for the selected table row.
    pub fn selection_style(&self) -> Style {
        Style::default()
            .fg(self.selection_fg)
            .bg(self.selection_bg)
            .add_modifier(Modifier::BOLD)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

/// Install the global theme. Later calls are ignored.
pub fn init_theme(theme: Theme) {
    let _ = THEME.set(theme);
}

/// Install the theme named in the configuration, falling back to dark.
pub fn load_theme(name: &str) {
    let theme = Theme::by_name(name).unwrap_or_else(|| {
        warn!(name, "Unknown theme, using dark");
        Theme::dark()
    });
    init_theme(theme);
}

/// Get the active theme. Defaults to dark when none was installed.
pub fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::dark)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_by_name() {
        assert_eq!(Theme::by_name("dark"), Some(Theme::dark()));
        assert_eq!(Theme::by_name(" Light "), Some(Theme::light()));
        assert_eq!(Theme::by_name("solarized"), None);
    }

    #[test]
    fn test_theme_is_always_available() {
        let t = theme();
        assert!(t.name == "dark" || t.name == "light");
    }
}
