pub mod color;

use ratatui::style::{Modifier, Style};
use serde::{Deserialize, Serialize};

pub use color::{ChartColors, ColorPalette, InputColors, ThemeColors};

/// Light or dark appearance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }
}

/// Main theme structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub mode: ThemeMode,
    pub colors: ThemeColors,
}

impl Theme {
    /// Create the light dashboard theme
    pub fn light() -> Self {
        Self {
            name: "Light".to_string(),
            mode: ThemeMode::Light,
            colors: ThemeColors::light(),
        }
    }

    /// Create the dark dashboard theme
    pub fn dark() -> Self {
        Self {
            name: "Dark".to_string(),
            mode: ThemeMode::Dark,
            colors: ThemeColors::dark(),
        }
    }

    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => Self::light(),
            ThemeMode::Dark => Self::dark(),
        }
    }

    /// Switch between light and dark
    pub fn toggle(&mut self) {
        *self = Self::for_mode(self.mode.toggled());
    }

    /// Panel border style
    pub fn border_style(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.colors.palette.border_focused)
        } else {
            Style::default().fg(self.colors.palette.border)
        }
    }

    /// Panel title style
    pub fn title_style(&self) -> Style {
        Style::default()
            .fg(self.colors.palette.text_primary)
            .add_modifier(Modifier::BOLD)
    }

    /// Base style for panel bodies
    pub fn surface_style(&self) -> Style {
        Style::default()
            .bg(self.colors.palette.surface)
            .fg(self.colors.palette.text_secondary)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}
