use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use super::{FocusedPane, ViewState};
use crate::tea::QueryState;
use crate::theme::Theme;

/// Recent queries, newest at the top
pub fn render_history(frame: &mut Frame, area: Rect, state: &QueryState, view: &ViewState, theme: &Theme) {
    let palette = &theme.colors.palette;
    let focused = view.focused_pane == FocusedPane::History;

    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(" ⟲ Recent Queries ", theme.title_style()))
        .border_style(theme.border_style(focused))
        .style(theme.surface_style());

    if state.query_history.is_empty() {
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "No queries yet",
                Style::default().fg(palette.text_muted),
            )),
            Line::from(Span::styled(
                "Your query history will appear here",
                Style::default().fg(palette.disabled),
            )),
        ];
        let empty = Paragraph::new(text)
            .alignment(ratatui::layout::Alignment::Center)
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = display_order(state)
        .map(|(_, query)| {
            ListItem::new(Line::from(vec![
                Span::styled(" ↻ ", Style::default().fg(palette.text_muted)),
                Span::styled(query.as_str(), Style::default().fg(palette.text_secondary)),
            ]))
        })
        .collect();

    let list = List::new(items).block(block).highlight_style(
        Style::default()
            .bg(palette.selection)
            .fg(palette.selection_text)
            .add_modifier(Modifier::BOLD),
    );

    let mut list_state = ListState::default();
    if focused {
        list_state.select(Some(view.history_cursor.min(state.query_history.len() - 1)));
    }
    frame.render_stateful_widget(list, area, &mut list_state);
}

/// History entries as drawn (newest first), paired with their store index
pub fn display_order(state: &QueryState) -> impl Iterator<Item = (usize, &String)> + '_ {
    state.query_history.iter().enumerate().rev()
}

/// Store index of the row under the history cursor
pub fn history_index_at(state: &QueryState, cursor: usize) -> Option<usize> {
    display_order(state).nth(cursor).map(|(index, _)| index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tea::{update, QueryAction};
    use crate::ui::test_support::draw;

    fn with_history(queries: &[&str]) -> QueryState {
        queries.iter().fold(QueryState::default(), |state, q| {
            update(state, QueryAction::AddToHistory(q.to_string()))
        })
    }

    #[test]
    fn test_cursor_maps_newest_first() {
        let state = with_history(&["first", "second", "third"]);
        assert_eq!(history_index_at(&state, 0), Some(2));
        assert_eq!(history_index_at(&state, 2), Some(0));
        assert_eq!(history_index_at(&state, 3), None);
    }

    #[test]
    fn test_render_empty_placeholder() {
        let text = draw(40, 8, |f| {
            let area = f.size();
            render_history(f, area, &QueryState::default(), &ViewState::default(), &Theme::light())
        });
        assert!(text.contains("No queries yet"));
    }

    #[test]
    fn test_render_entries() {
        let state = with_history(&["revenue by region", "sales trend"]);
        let mut view = ViewState::default();
        view.focused_pane = FocusedPane::History;
        let text = draw(40, 8, |f| {
            let area = f.size();
            render_history(f, area, &state, &view, &Theme::light())
        });
        assert!(text.contains("sales trend"));
        assert!(text.contains("revenue by region"));
        assert!(!text.contains("No queries yet"));
    }
}
