use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

use super::layout::DashboardLayout;
use crate::theme::Theme;

/// Rows of the settings overlay, top to bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsItem {
    ShowSuggestions,
    AutoRefresh,
}

impl SettingsItem {
    pub const ALL: [SettingsItem; 2] = [SettingsItem::ShowSuggestions, SettingsItem::AutoRefresh];

    pub fn label(self) -> &'static str {
        match self {
            SettingsItem::ShowSuggestions => "Show query suggestions",
            SettingsItem::AutoRefresh => "Auto-refresh results",
        }
    }
}

/// Settings overlay state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsView {
    pub open: bool,
    pub cursor: usize,
    pub show_suggestions: bool,
    pub auto_refresh: bool,
}

impl Default for SettingsView {
    fn default() -> Self {
        Self {
            open: false,
            cursor: 0,
            show_suggestions: true,
            auto_refresh: true,
        }
    }
}

impl SettingsView {
    pub fn selected(&self) -> SettingsItem {
        SettingsItem::ALL[self.cursor.min(SettingsItem::ALL.len() - 1)]
    }

    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.cursor + 1 < SettingsItem::ALL.len() {
            self.cursor += 1;
        }
    }

    pub fn value(&self, item: SettingsItem) -> bool {
        match item {
            SettingsItem::ShowSuggestions => self.show_suggestions,
            SettingsItem::AutoRefresh => self.auto_refresh,
        }
    }

    /// Flip the highlighted toggle and return which one changed
    pub fn toggle_selected(&mut self) -> SettingsItem {
        let item = self.selected();
        match item {
            SettingsItem::ShowSuggestions => self.show_suggestions = !self.show_suggestions,
            SettingsItem::AutoRefresh => self.auto_refresh = !self.auto_refresh,
        }
        item
    }
}

pub fn render_settings(frame: &mut Frame, bounds: Rect, settings: &SettingsView, theme: &Theme) {
    let palette = &theme.colors.palette;
    let area = DashboardLayout::centered_rect(50, 40, bounds);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(" ⚙ Dashboard Settings ", theme.title_style()))
        .border_style(theme.border_style(true))
        .style(Style::default().bg(palette.overlay));

    frame.render_widget(Clear, area);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let items: Vec<ListItem> = SettingsItem::ALL
        .iter()
        .map(|&item| {
            let (mark, color) = if settings.value(item) {
                ("[x] ", palette.accent)
            } else {
                ("[ ] ", palette.text_muted)
            };
            ListItem::new(Line::from(vec![
                Span::styled(mark, Style::default().fg(color)),
                Span::styled(item.label(), Style::default().fg(palette.text_primary)),
            ]))
        })
        .collect();

    let list = List::new(items).highlight_style(
        Style::default()
            .bg(palette.selection)
            .fg(palette.selection_text)
            .add_modifier(Modifier::BOLD),
    );
    let mut list_state = ListState::default();
    list_state.select(Some(settings.cursor));

    let list_area = Rect {
        height: inner.height.saturating_sub(1),
        ..inner
    };
    frame.render_stateful_widget(list, list_area, &mut list_state);

    if inner.height > 0 {
        let hint_area = Rect {
            y: inner.bottom() - 1,
            height: 1,
            ..inner
        };
        let hint = Paragraph::new("Space toggle · Esc close")
            .style(Style::default().fg(palette.text_muted));
        frame.render_widget(hint, hint_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::test_support::draw;

    #[test]
    fn test_cursor_stays_in_range() {
        let mut settings = SettingsView::default();
        settings.move_up();
        assert_eq!(settings.selected(), SettingsItem::ShowSuggestions);
        settings.move_down();
        settings.move_down();
        assert_eq!(settings.selected(), SettingsItem::AutoRefresh);
    }

    #[test]
    fn test_toggle_selected() {
        let mut settings = SettingsView::default();
        assert_eq!(settings.toggle_selected(), SettingsItem::ShowSuggestions);
        assert!(!settings.show_suggestions);
        assert!(settings.auto_refresh);

        settings.move_down();
        settings.toggle_selected();
        assert!(!settings.auto_refresh);
    }

    #[test]
    fn test_render_overlay() {
        let settings = SettingsView {
            open: true,
            auto_refresh: false,
            ..SettingsView::default()
        };
        let text = draw(80, 24, |f| {
            let area = f.size();
            render_settings(f, area, &settings, &Theme::light())
        });
        assert!(text.contains("Dashboard Settings"));
        assert!(text.contains("[x] Show query suggestions"));
        assert!(text.contains("[ ] Auto-refresh results"));
    }
}
