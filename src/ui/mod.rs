pub mod history;
pub mod input;
pub mod layout;
pub mod results;
pub mod settings;

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use serde::{Deserialize, Serialize};

use crate::tea::QueryState;
use crate::theme::Theme;

use self::layout::DashboardLayout;

pub use results::{ResultsView, results_view};
pub use settings::{SettingsItem, SettingsView};

/// How the results series is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartStyle {
    #[default]
    Line,
    Bar,
}

impl ChartStyle {
    pub fn toggled(self) -> Self {
        match self {
            ChartStyle::Line => ChartStyle::Bar,
            ChartStyle::Bar => ChartStyle::Line,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ChartStyle::Line => "Line",
            ChartStyle::Bar => "Bar",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    QueryInput,
    History,
}

/// Presentation-only state. Nothing here is authoritative; it only decides
/// how the [`QueryState`] snapshot is drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub focused_pane: FocusedPane,
    /// Highlighted suggestion while the dropdown is open
    pub suggestion_cursor: Option<usize>,
    /// Highlighted history row
    pub history_cursor: usize,
    pub chart_style: ChartStyle,
    pub settings: SettingsView,
    /// Copied from the typing indicator before each draw
    pub typing: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            focused_pane: FocusedPane::QueryInput,
            suggestion_cursor: None,
            history_cursor: 0,
            chart_style: ChartStyle::default(),
            settings: SettingsView::default(),
            typing: false,
        }
    }
}

/// Draw the whole dashboard for one frame
pub fn render(frame: &mut Frame, state: &QueryState, view: &ViewState, theme: &Theme) {
    let size = frame.size();
    frame.render_widget(
        Block::default().style(Style::default().bg(theme.colors.palette.background)),
        size,
    );

    let areas = DashboardLayout::new().calculate_layout(size);

    render_header(frame, areas.header, theme);
    input::render_input(frame, areas.input, state, view, theme);
    results::render_results(frame, areas.results, state, view.chart_style, theme);
    history::render_history(frame, areas.history, state, view, theme);
    render_status_bar(frame, areas.status_bar, view, theme);

    if state.suggestions_visible() && view.settings.show_suggestions && !state.suggestions.is_empty() {
        let dropdown =
            DashboardLayout::suggestions_area(areas.input, size, state.suggestions.len());
        input::render_suggestions(frame, dropdown, state, view, theme);
    }

    if view.settings.open {
        settings::render_settings(frame, size, &view.settings, theme);
    }
}

fn render_header(frame: &mut Frame, area: Rect, theme: &Theme) {
    let palette = &theme.colors.palette;
    let title = Line::from(vec![
        Span::styled("▁▃▅ ", Style::default().fg(palette.accent)),
        Span::styled(
            "Gen AI Analytics Dashboard",
            Style::default()
                .fg(palette.text_primary)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("   [{}]", theme.name),
            Style::default().fg(palette.text_muted),
        ),
    ]);

    let header = Paragraph::new(title).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(theme.border_style(false))
            .style(Style::default().bg(palette.surface)),
    );
    frame.render_widget(header, area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, view: &ViewState, theme: &Theme) {
    let hints = match view.focused_pane {
        FocusedPane::QueryInput => {
            "Enter submit · ↑↓ suggestions · Ctrl+U clear · Tab history · Ctrl+G chart · Ctrl+T theme · Ctrl+S settings · Ctrl+C quit"
        }
        FocusedPane::History => {
            "Enter recall · ↑↓ select · d clear history · Tab input · Ctrl+T theme · Ctrl+C quit"
        }
    };

    let bar = Paragraph::new(hints)
        .style(Style::default().fg(theme.colors.palette.text_muted))
        .alignment(Alignment::Center);
    frame.render_widget(bar, area);
}
