//! Color theme definitions for the ratatui TUI
//!
//! Defines colors and styles used throughout the picker.

use crate::config::ThemeName;
use ratatui::style::{Color, Modifier, Style};

/// Theme configuration for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    /// Background color for the highlighted row
    pub selection_bg: Color,
    /// Foreground color for the highlighted row
    pub selection_fg: Color,
    /// Color for matched characters in fuzzy search
    pub match_highlight: Color,
    /// Color for the cursor indicator
    pub cursor: Color,
    /// Color for the chosen-item marker
    pub chosen: Color,
    /// Color for borders
    pub border: Color,
    /// Color for dimmed/inactive text
    pub dimmed: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl From<ThemeName> for Theme {
    fn from(name: ThemeName) -> Self {
        match name {
            ThemeName::Dark => Self::dark(),
            ThemeName::Light => Self::light(),
        }
    }
}

impl Theme {
    /// Create a dark theme (default)
    #[must_use]
    pub const fn dark() -> Self {
        Self {
            selection_bg: Color::Blue,
            selection_fg: Color::White,
            match_highlight: Color::Yellow,
            cursor: Color::Cyan,
            chosen: Color::Green,
            border: Color::DarkGray,
            dimmed: Color::DarkGray,
        }
    }

    /// Create a light theme
    #[must_use]
    pub const fn light() -> Self {
        Self {
            selection_bg: Color::LightBlue,
            selection_fg: Color::Black,
            match_highlight: Color::Red,
            cursor: Color::Blue,
            chosen: Color::Green,
            border: Color::Gray,
            dimmed: Color::Gray,
        }
    }

    /// Style for the highlighted row
    #[must_use]
    pub fn selected_style(&self) -> Style {
        Style::default()
            .bg(self.selection_bg)
            .fg(self.selection_fg)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for other rows
    #[must_use]
    pub fn normal_style(&self) -> Style {
        Style::default()
    }

    /// Style for the cursor indicator (>)
    #[must_use]
    pub fn cursor_style(&self) -> Style {
        Style::default()
            .fg(self.cursor)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for matched characters in fuzzy search
    #[must_use]
    pub fn match_style(&self) -> Style {
        Style::default()
            .fg(self.match_highlight)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    }

    /// Style for the chosen-item marker (✓)
    #[must_use]
    pub fn chosen_style(&self) -> Style {
        Style::default()
            .fg(self.chosen)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for borders
    #[must_use]
    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    /// Style for dimmed text
    #[must_use]
    pub fn dimmed_style(&self) -> Style {
        Style::default().fg(self.dimmed)
    }
}
