use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, BarChart, Block, Borders, Chart, Dataset, GraphType, Paragraph, Wrap},
    Frame,
};

use super::ChartStyle;
use crate::tea::{DataPoint, QueryState};
use crate::theme::Theme;

/// What the results panel shows for a given state, in priority order
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResultsView<'a> {
    Loading,
    Error(&'a str),
    Empty,
    Chart(&'a [DataPoint]),
}

/// Pick the panel content: spinner, then error banner, then placeholder,
/// then the chart
pub fn results_view(state: &QueryState) -> ResultsView<'_> {
    if state.is_loading() {
        return ResultsView::Loading;
    }
    if let Some(error) = state.error() {
        return ResultsView::Error(error);
    }
    match state.results.as_deref() {
        Some(series) if !series.is_empty() => ResultsView::Chart(series),
        _ => ResultsView::Empty,
    }
}

/// Axis bounds covering every point, with a little headroom above
pub fn chart_bounds(series: &[DataPoint]) -> ([f64; 2], [f64; 2]) {
    let x_max = series.len().saturating_sub(1).max(1) as f64;
    let y_min = series.iter().map(|p| p.value).fold(0.0_f64, f64::min);
    let y_max = series.iter().map(|p| p.value).fold(0.0_f64, f64::max);
    let headroom = ((y_max - y_min) * 0.1).max(1.0);
    ([0.0, x_max], [y_min, y_max + headroom])
}

pub fn render_results(
    frame: &mut Frame,
    area: Rect,
    state: &QueryState,
    style: ChartStyle,
    theme: &Theme,
) {
    let palette = &theme.colors.palette;
    let view = results_view(state);

    let title = match view {
        ResultsView::Chart(_) => format!(" Analysis Results · {} ", style.label()),
        _ => " Analysis Results ".to_string(),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(title, theme.title_style()))
        .border_style(theme.border_style(false))
        .style(theme.surface_style());

    match view {
        ResultsView::Loading => {
            let text = vec![
                Line::from(Span::styled("⟳", Style::default().fg(palette.info))),
                Line::from(Span::styled(
                    "Processing your query...",
                    Style::default().fg(palette.text_muted),
                )),
            ];
            render_centered(frame, area, block, text);
        }
        ResultsView::Error(message) => {
            let text = vec![
                Line::from(Span::styled("⚠", Style::default().fg(palette.error))),
                Line::from(Span::styled(
                    message,
                    Style::default()
                        .fg(palette.error)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    "Please try another query",
                    Style::default().fg(palette.text_muted),
                )),
            ];
            render_centered(frame, area, block, text);
        }
        ResultsView::Empty => {
            let text = vec![
                Line::from(Span::styled(
                    "Enter a query to see results",
                    Style::default().fg(palette.text_secondary),
                )),
                Line::from(Span::styled(
                    "Try one of the suggested queries above",
                    Style::default().fg(palette.text_muted),
                )),
            ];
            render_centered(frame, area, block, text);
        }
        ResultsView::Chart(series) => match style {
            ChartStyle::Line => render_line_chart(frame, area, block, series, theme),
            ChartStyle::Bar => render_bar_chart(frame, area, block, series, theme),
        },
    }
}

fn render_centered(frame: &mut Frame, area: Rect, block: Block, text: Vec<Line>) {
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let height = text.len() as u16;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(inner);

    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, chunks[1]);
}

fn render_line_chart(frame: &mut Frame, area: Rect, block: Block, series: &[DataPoint], theme: &Theme) {
    let colors = &theme.colors.chart;
    let points: Vec<(f64, f64)> = series
        .iter()
        .enumerate()
        .map(|(i, p)| (i as f64, p.value))
        .collect();
    let (x_bounds, y_bounds) = chart_bounds(series);

    let axis_style = Style::default().fg(colors.axis);
    let x_labels: Vec<Span> = match (series.first(), series.last()) {
        (Some(first), Some(last)) if series.len() > 1 => vec![
            Span::styled(first.name.as_str(), axis_style),
            Span::styled(last.name.as_str(), axis_style),
        ],
        (Some(only), _) => vec![Span::styled(only.name.as_str(), axis_style)],
        _ => Vec::new(),
    };
    let y_labels = vec![
        Span::styled(format!("{:.0}", y_bounds[0]), axis_style),
        Span::styled(format!("{:.0}", (y_bounds[0] + y_bounds[1]) / 2.0), axis_style),
        Span::styled(format!("{:.0}", y_bounds[1]), axis_style),
    ];

    let dataset = Dataset::default()
        .name("Value")
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(colors.series))
        .data(&points);

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .style(Style::default().fg(colors.grid))
                .bounds(x_bounds)
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(colors.grid))
                .bounds(y_bounds)
                .labels(y_labels),
        );

    frame.render_widget(chart, area);
}

fn render_bar_chart(frame: &mut Frame, area: Rect, block: Block, series: &[DataPoint], theme: &Theme) {
    let colors = &theme.colors.chart;
    let bars: Vec<(&str, u64)> = series
        .iter()
        .map(|p| (p.name.as_str(), p.value.max(0.0).round() as u64))
        .collect();

    let inner_width = block.inner(area).width;
    let count = bars.len().max(1) as u16;
    let bar_width = (inner_width / count).saturating_sub(1).clamp(1, 12);

    let chart = BarChart::default()
        .block(block)
        .data(bars.as_slice())
        .bar_width(bar_width)
        .bar_gap(1)
        .bar_style(Style::default().fg(colors.series))
        .value_style(
            Style::default()
                .fg(theme.colors.palette.surface)
                .bg(colors.series),
        )
        .label_style(Style::default().fg(colors.axis));

    frame.render_widget(chart, area);
}
