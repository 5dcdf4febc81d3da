use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::ui::FocusedPane;

/// What a key press asks the dashboard to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Quit,
    InsertChar(char),
    Backspace,
    ClearInput,
    /// Enter: submit the query, pick a suggestion or recall history
    Select,
    FocusNext,
    MoveUp,
    MoveDown,
    ClearHistory,
    ToggleTheme,
    ToggleChartStyle,
    ToggleSettings,
    /// Space inside the settings overlay
    ToggleSetting,
    Cancel,
}

/// Map a key event to an intent given where focus currently is
pub fn map_key(key: KeyEvent, focus: FocusedPane, settings_open: bool) -> Option<Intent> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') => Some(Intent::Quit),
            KeyCode::Char('u') if !settings_open => Some(Intent::ClearInput),
            KeyCode::Char('t') => Some(Intent::ToggleTheme),
            KeyCode::Char('g') => Some(Intent::ToggleChartStyle),
            KeyCode::Char('s') => Some(Intent::ToggleSettings),
            _ => None,
        };
    }

    // The overlay swallows everything else
    if settings_open {
        return match key.code {
            KeyCode::Up => Some(Intent::MoveUp),
            KeyCode::Down => Some(Intent::MoveDown),
            KeyCode::Char(' ') | KeyCode::Enter => Some(Intent::ToggleSetting),
            KeyCode::Esc => Some(Intent::ToggleSettings),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Enter => Some(Intent::Select),
        KeyCode::Tab | KeyCode::BackTab => Some(Intent::FocusNext),
        KeyCode::Up => Some(Intent::MoveUp),
        KeyCode::Down => Some(Intent::MoveDown),
        KeyCode::Esc => Some(Intent::Cancel),
        _ => match focus {
            FocusedPane::QueryInput => match key.code {
                KeyCode::Char(c) => Some(Intent::InsertChar(c)),
                KeyCode::Backspace => Some(Intent::Backspace),
                _ => None,
            },
            FocusedPane::History => match key.code {
                KeyCode::Char('d') => Some(Intent::ClearHistory),
                KeyCode::Char('k') => Some(Intent::MoveUp),
                KeyCode::Char('j') => Some(Intent::MoveDown),
                KeyCode::Char('q') => Some(Intent::Quit),
                _ => None,
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn test_typing_goes_to_input() {
        let input = FocusedPane::QueryInput;
        assert_eq!(map_key(key(KeyCode::Char('d')), input, false), Some(Intent::InsertChar('d')));
        assert_eq!(map_key(key(KeyCode::Char('q')), input, false), Some(Intent::InsertChar('q')));
        assert_eq!(map_key(key(KeyCode::Backspace), input, false), Some(Intent::Backspace));
        assert_eq!(map_key(key(KeyCode::Enter), input, false), Some(Intent::Select));
    }

    #[test]
    fn test_history_pane_keys() {
        let history = FocusedPane::History;
        assert_eq!(map_key(key(KeyCode::Char('d')), history, false), Some(Intent::ClearHistory));
        assert_eq!(map_key(key(KeyCode::Char('j')), history, false), Some(Intent::MoveDown));
        assert_eq!(map_key(key(KeyCode::Backspace), history, false), None);
    }

    #[test]
    fn test_control_shortcuts() {
        let input = FocusedPane::QueryInput;
        assert_eq!(map_key(ctrl('c'), input, false), Some(Intent::Quit));
        assert_eq!(map_key(ctrl('u'), input, false), Some(Intent::ClearInput));
        assert_eq!(map_key(ctrl('t'), input, false), Some(Intent::ToggleTheme));
        assert_eq!(map_key(ctrl('g'), input, false), Some(Intent::ToggleChartStyle));
        assert_eq!(map_key(ctrl('s'), input, true), Some(Intent::ToggleSettings));
    }

    #[test]
    fn test_settings_overlay_captures_keys() {
        let input = FocusedPane::QueryInput;
        assert_eq!(map_key(key(KeyCode::Char('x')), input, true), None);
        assert_eq!(map_key(key(KeyCode::Char(' ')), input, true), Some(Intent::ToggleSetting));
        assert_eq!(map_key(key(KeyCode::Esc), input, true), Some(Intent::ToggleSettings));
        assert_eq!(map_key(ctrl('u'), input, true), None);
    }

    #[test]
    fn test_release_events_ignored() {
        let mut release = key(KeyCode::Enter);
        release.kind = KeyEventKind::Release;
        assert_eq!(map_key(release, FocusedPane::QueryInput, false), None);
    }
}
