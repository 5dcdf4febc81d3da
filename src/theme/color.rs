use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Base color palette shared by every panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorPalette {
    // Base colors
    pub background: Color,
    pub surface: Color,
    pub overlay: Color,

    // Text colors
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_muted: Color,

    // UI element colors
    pub border: Color,
    pub border_focused: Color,
    pub selection: Color,
    pub selection_text: Color,

    // Status colors
    pub error: Color,
    pub info: Color,

    // Special purpose colors
    pub accent: Color,
    pub disabled: Color,
}

/// Colors for the results chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartColors {
    pub series: Color,
    pub axis: Color,
    pub grid: Color,
}

/// Colors for the query input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputColors {
    pub icon_idle: Color,
    pub icon_typing: Color,
    pub placeholder: Color,
    pub submit_enabled: Color,
}

/// Complete theme color scheme
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeColors {
    pub palette: ColorPalette,
    pub chart: ChartColors,
    pub input: InputColors,
}

impl ThemeColors {
    /// Dark dashboard colors
    pub fn dark() -> Self {
        let palette = ColorPalette {
            background: Color::Rgb(17, 24, 39),
            surface: Color::Rgb(31, 41, 55),
            overlay: Color::Rgb(55, 65, 81),
            text_primary: Color::Rgb(243, 244, 246),
            text_secondary: Color::Rgb(209, 213, 219),
            text_muted: Color::Rgb(156, 163, 175),
            border: Color::Rgb(55, 65, 81),
            border_focused: Color::Rgb(59, 130, 246),
            selection: Color::Rgb(75, 85, 99),
            selection_text: Color::Rgb(243, 244, 246),
            error: Color::Rgb(239, 68, 68),
            info: Color::Rgb(59, 130, 246),
            accent: Color::Rgb(59, 130, 246),
            disabled: Color::Rgb(107, 114, 128),
        };

        Self {
            chart: ChartColors {
                series: palette.accent,
                axis: Color::Rgb(156, 163, 175),
                grid: Color::Rgb(55, 65, 81),
            },
            input: InputColors {
                icon_idle: palette.text_muted,
                icon_typing: palette.accent,
                placeholder: palette.text_muted,
                submit_enabled: palette.accent,
            },
            palette,
        }
    }

    /// Light dashboard colors
    pub fn light() -> Self {
        let palette = ColorPalette {
            background: Color::Rgb(249, 250, 251),
            surface: Color::Rgb(255, 255, 255),
            overlay: Color::Rgb(243, 244, 246),
            text_primary: Color::Rgb(17, 24, 39),
            text_secondary: Color::Rgb(55, 65, 81),
            text_muted: Color::Rgb(107, 114, 128),
            border: Color::Rgb(209, 213, 219),
            border_focused: Color::Rgb(59, 130, 246),
            selection: Color::Rgb(229, 231, 235),
            selection_text: Color::Rgb(17, 24, 39),
            error: Color::Rgb(220, 38, 38),
            info: Color::Rgb(59, 130, 246),
            accent: Color::Rgb(59, 130, 246),
            disabled: Color::Rgb(156, 163, 175),
        };

        Self {
            chart: ChartColors {
                series: palette.accent,
                axis: Color::Rgb(75, 85, 99),
                grid: Color::Rgb(229, 231, 235),
            },
            input: InputColors {
                icon_idle: Color::Rgb(156, 163, 175),
                icon_typing: palette.accent,
                placeholder: palette.text_muted,
                submit_enabled: palette.accent,
            },
            palette,
        }
    }
}
