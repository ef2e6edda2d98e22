//! Theme configuration for the TUI.
//!
//! Supports light and dark themes with automatic terminal detection.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::block::BorderType;

use crate::settings::ThemeChoice;

/// Color and style theme for the TUI.
///
/// Use [`Theme::auto_detect()`] for automatic theme selection based on
/// terminal background, or [`Theme::dark()`]/[`Theme::light()`] explicitly.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Accent color for highlights and active elements.
    pub highlight: Color,
    /// Color for rejected input and feed errors.
    pub error: Color,
    /// Color for confirmations.
    pub success: Color,
    /// Color for borders and separators.
    pub border: Color,
    /// Line color of the pre-oxygenator series.
    pub pre_series: Color,
    /// Line color of the post-oxygenator series.
    pub post_series: Color,
    /// Style for header rows in tables.
    pub header: Style,
    /// Style for selected/highlighted rows.
    pub selected: Style,
    /// Style for the active tab.
    pub tab_active: Style,
    /// Style for inactive tabs.
    pub tab_inactive: Style,
    /// Border style (rounded, plain, etc.).
    pub border_type: BorderType,
}

impl Theme {
    /// Create a dark theme suitable for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            highlight: Color::Cyan,
            error: Color::Red,
            success: Color::Green,
            border: Color::Gray,
            pre_series: Color::LightMagenta,
            post_series: Color::LightYellow,
            header: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            selected: Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD),
            tab_active: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::Gray),
            border_type: BorderType::Rounded,
        }
    }

    /// Create a light theme suitable for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            highlight: Color::Blue,
            error: Color::Red,
            success: Color::Green,
            border: Color::DarkGray,
            pre_series: Color::Magenta,
            post_series: Color::Rgb(160, 110, 0),
            header: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            selected: Style::default().bg(Color::LightBlue).add_modifier(Modifier::BOLD),
            tab_active: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::DarkGray),
            border_type: BorderType::Rounded,
        }
    }

    /// Auto-detect based on terminal background
    pub fn auto_detect() -> Self {
        // Use terminal-light crate to detect background luminance
        match terminal_light::luma() {
            Ok(luma) if luma > 0.5 => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Resolve a configured theme choice.
    pub fn from_choice(choice: ThemeChoice) -> Self {
        match choice {
            ThemeChoice::Auto => Self::auto_detect(),
            ThemeChoice::Dark => Self::dark(),
            ThemeChoice::Light => Self::light(),
        }
    }

    /// Style for a status message.
    pub fn message_style(&self, is_error: bool) -> Style {
        if is_error {
            Style::default().fg(self.error).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.success)
        }
    }
}
