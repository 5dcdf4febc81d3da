use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{
        block::{Position, Title},
        Block, Borders, Clear, List, ListItem, ListState, Paragraph,
    },
    Frame,
};

use super::{FocusedPane, ViewState};
use crate::tea::QueryState;
use crate::theme::Theme;

pub const PLACEHOLDER: &str = "Ask anything about your data...";

/// Query input box with typing and submit indicators
pub fn render_input(frame: &mut Frame, area: Rect, state: &QueryState, view: &ViewState, theme: &Theme) {
    let colors = &theme.colors;
    let focused = view.focused_pane == FocusedPane::QueryInput;

    let icon_color = if view.typing {
        colors.input.icon_typing
    } else {
        colors.input.icon_idle
    };
    let submit_color = if state.can_submit() {
        colors.input.submit_enabled
    } else {
        colors.palette.disabled
    };

    let mut spans = vec![Span::styled(" ⌕ ", Style::default().fg(icon_color))];
    if state.current_query.is_empty() {
        spans.push(Span::styled(
            PLACEHOLDER,
            Style::default().fg(colors.input.placeholder),
        ));
    } else {
        spans.push(Span::styled(
            state.current_query.as_str(),
            Style::default().fg(colors.palette.text_primary),
        ));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_style(focused))
        .title(
            Title::from(Span::styled(" ➤ send ", Style::default().fg(submit_color)))
                .position(Position::Bottom)
                .alignment(Alignment::Right),
        )
        .style(theme.surface_style());

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);

    if focused && !view.settings.open {
        // Cursor sits after the icon and the typed text
        let offset = 4 + state.current_query.chars().count() as u16;
        let x = (area.x + offset).min(area.right().saturating_sub(2));
        frame.set_cursor(x, area.y + 1);
    }
}

/// Dropdown of suggested queries under the input
pub fn render_suggestions(frame: &mut Frame, area: Rect, state: &QueryState, view: &ViewState, theme: &Theme) {
    let palette = &theme.colors.palette;

    let items: Vec<ListItem> = state
        .suggestions
        .iter()
        .map(|suggestion| {
            ListItem::new(Line::from(vec![
                Span::styled(" ⌕ ", Style::default().fg(palette.text_muted)),
                Span::styled(suggestion.as_str(), Style::default().fg(palette.text_secondary)),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border_style(false))
                .style(theme.surface_style()),
        )
        .highlight_style(
            Style::default()
                .bg(palette.selection)
                .fg(palette.selection_text)
                .add_modifier(Modifier::BOLD),
        );

    let mut list_state = ListState::default();
    list_state.select(view.suggestion_cursor);

    frame.render_widget(Clear, area);
    frame.render_stateful_widget(list, area, &mut list_state);
}
