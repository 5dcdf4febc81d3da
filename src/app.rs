use anyhow::Result;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{backend::CrosstermBackend, Frame, Terminal};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio::time::{Duration, Instant};

use crate::backend::QueryBackend;
use crate::config::DashboardConfig;
use crate::events::{map_key, Intent};
use crate::submission::{SubmissionController, SubmitOutcome};
use crate::tea::{QueryAction, QueryState, QueryStore};
use crate::theme::Theme;
use crate::timing::{BlurGrace, TypingIndicator};
use crate::ui::{self, history::history_index_at, FocusedPane, SettingsItem, SettingsView, ViewState};

const TICK_RATE: Duration = Duration::from_millis(50);

pub struct App {
    store: QueryStore,
    controller: SubmissionController,
    view: ViewState,
    theme: Theme,
    config: DashboardConfig,
    config_path: Option<PathBuf>,
    typing: TypingIndicator,
    blur: BlurGrace,
    inflight: Vec<JoinHandle<SubmitOutcome>>,
    should_quit: bool,
}

impl App {
    pub fn new(config: DashboardConfig, backend: Arc<dyn QueryBackend>) -> Self {
        let store = QueryStore::new(QueryState::new(config.suggestions.clone()));
        let controller = SubmissionController::new(store.clone(), backend)
            .with_policy(config.completion_policy);

        let view = ViewState {
            chart_style: config.appearance.chart_style,
            settings: SettingsView {
                show_suggestions: config.show_suggestions,
                auto_refresh: config.auto_refresh,
                ..SettingsView::default()
            },
            ..ViewState::default()
        };

        Self {
            store,
            controller,
            view,
            theme: Theme::for_mode(config.appearance.theme),
            typing: TypingIndicator::new(config.typing_debounce()),
            blur: BlurGrace::new(config.blur_grace()),
            config,
            config_path: None,
            inflight: Vec::new(),
            should_quit: false,
        }
    }

    /// Write appearance and settings changes back to this file
    pub fn with_config_path(mut self, path: PathBuf) -> Self {
        self.config_path = Some(path);
        self
    }

    pub fn store(&self) -> &QueryStore {
        &self.store
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Submissions whose fetch has not resolved yet
    pub fn inflight(&self) -> usize {
        self.inflight.iter().filter(|h| !h.is_finished()).count()
    }

    pub fn handle_intent(&mut self, intent: Intent, now: Instant) {
        tracing::trace!(?intent, "Handling intent");
        match intent {
            Intent::Quit => self.should_quit = true,
            Intent::InsertChar(c) => {
                let mut query = self.store.read(|s| s.current_query.clone());
                query.push(c);
                self.set_query(query, now);
            }
            Intent::Backspace => {
                let mut query = self.store.read(|s| s.current_query.clone());
                if query.pop().is_some() {
                    self.set_query(query, now);
                }
            }
            Intent::ClearInput => self.set_query(String::new(), now),
            Intent::Select => match self.view.focused_pane {
                FocusedPane::QueryInput => match self.highlighted_suggestion() {
                    Some(index) => self.select_suggestion(index, now),
                    None => self.submit(),
                },
                FocusedPane::History => self.recall_history(now),
            },
            Intent::FocusNext => match self.view.focused_pane {
                FocusedPane::QueryInput => self.blur_input(now),
                FocusedPane::History => self.focus_input(),
            },
            Intent::MoveUp => self.move_cursor(-1),
            Intent::MoveDown => self.move_cursor(1),
            Intent::ClearHistory => {
                self.store.dispatch(QueryAction::ClearHistory);
                self.view.history_cursor = 0;
            }
            Intent::ToggleTheme => {
                self.theme.toggle();
                tracing::debug!(theme = %self.theme.name, "Theme toggled");
                self.persist_settings();
            }
            Intent::ToggleChartStyle => {
                self.view.chart_style = self.view.chart_style.toggled();
                self.persist_settings();
            }
            Intent::ToggleSettings => self.view.settings.open = !self.view.settings.open,
            Intent::ToggleSetting => {
                if self.view.settings.toggle_selected() == SettingsItem::ShowSuggestions
                    && !self.view.settings.show_suggestions
                {
                    self.view.suggestion_cursor = None;
                    self.store.dispatch(QueryAction::HideSuggestions);
                }
                self.persist_settings();
            }
            Intent::Cancel => match self.view.focused_pane {
                FocusedPane::QueryInput => {
                    self.view.suggestion_cursor = None;
                    self.store.dispatch(QueryAction::HideSuggestions);
                }
                FocusedPane::History => self.focus_input(),
            },
        }
    }

    /// Advance timers to `now` and reap finished submissions
    pub fn tick(&mut self, now: Instant) {
        self.typing.tick(now);
        self.view.typing = self.typing.is_typing();

        if self.blur.tick(now) {
            self.view.suggestion_cursor = None;
            self.store.dispatch(QueryAction::HideSuggestions);
        }

        self.inflight.retain(|handle| !handle.is_finished());
    }

    pub fn render(&self, frame: &mut Frame) {
        let state = self.store.snapshot();
        ui::render(frame, &state, &self.view, &self.theme);
    }

    fn set_query(&mut self, query: String, now: Instant) {
        self.typing.on_input(&query, now);
        self.view.typing = self.typing.is_typing();
        self.store.dispatch(QueryAction::SetCurrentQuery(query));
    }

    fn submit(&mut self) {
        let query = self.store.read(|s| s.current_query.clone());
        if let Some(handle) = self.controller.spawn(&query) {
            self.view.suggestion_cursor = None;
            self.inflight.push(handle);
        }
    }

    fn highlighted_suggestion(&self) -> Option<usize> {
        if !self.suggestions_open() {
            return None;
        }
        self.view.suggestion_cursor
    }

    fn suggestions_open(&self) -> bool {
        self.view.settings.show_suggestions
            && self.store.read(|s| s.suggestions_visible() && !s.suggestions.is_empty())
    }

    fn select_suggestion(&mut self, index: usize, now: Instant) {
        let Some(text) = self.store.read(|s| s.suggestions.get(index).cloned()) else {
            return;
        };
        self.blur.on_select();
        self.view.suggestion_cursor = None;
        self.typing.on_input(&text, now);
        self.view.typing = self.typing.is_typing();
        self.store.dispatch(QueryAction::SelectSuggestion(text));
    }

    fn recall_history(&mut self, now: Instant) {
        let Some(index) = self
            .store
            .read(|s| history_index_at(s, self.view.history_cursor))
        else {
            return;
        };
        self.store.dispatch(QueryAction::SelectHistory(index));
        let query = self.store.read(|s| s.current_query.clone());
        self.typing.on_input(&query, now);
        self.view.typing = self.typing.is_typing();
        self.view.focused_pane = FocusedPane::QueryInput;
    }

    fn blur_input(&mut self, now: Instant) {
        self.view.focused_pane = FocusedPane::History;
        self.view.suggestion_cursor = None;
        if self.store.read(|s| s.suggestions_visible()) {
            self.blur.on_blur(now);
        }
    }

    fn focus_input(&mut self) {
        self.view.focused_pane = FocusedPane::QueryInput;
        self.blur.on_focus();
        if self.view.settings.show_suggestions {
            self.store.dispatch(QueryAction::ShowSuggestions);
        }
    }

    fn move_cursor(&mut self, delta: isize) {
        if self.view.settings.open {
            if delta < 0 {
                self.view.settings.move_up();
            } else {
                self.view.settings.move_down();
            }
            return;
        }

        match self.view.focused_pane {
            FocusedPane::QueryInput => {
                if !self.view.settings.show_suggestions {
                    return;
                }
                if !self.suggestions_open() {
                    self.store.dispatch(QueryAction::ShowSuggestions);
                }
                let count = self.store.read(|s| s.suggestions.len());
                self.view.suggestion_cursor = step(self.view.suggestion_cursor, delta, count);
            }
            FocusedPane::History => {
                let count = self.store.read(|s| s.query_history.len());
                if let Some(cursor) = step(Some(self.view.history_cursor), delta, count) {
                    self.view.history_cursor = cursor;
                }
            }
        }
    }

    /// Save appearance and settings toggles without touching other fields
    /// of the file, so command-line overrides are never written back.
    fn persist_settings(&mut self) {
        self.config.appearance.theme = self.theme.mode;
        self.config.appearance.chart_style = self.view.chart_style;
        self.config.show_suggestions = self.view.settings.show_suggestions;
        self.config.auto_refresh = self.view.settings.auto_refresh;

        let Some(path) = self.config_path.as_deref() else {
            return;
        };
        let result = DashboardConfig::load_from(path).and_then(|mut on_disk| {
            on_disk.appearance = self.config.appearance.clone();
            on_disk.show_suggestions = self.config.show_suggestions;
            on_disk.auto_refresh = self.config.auto_refresh;
            on_disk.save_to(path)
        });
        if let Err(e) = result {
            tracing::warn!("Failed to save settings to {}: {}", path.display(), e);
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        if !io::stdout().is_tty() {
            return Err(anyhow::anyhow!(
                "querydash requires a terminal (TTY) to run"
            ));
        }

        enable_raw_mode()
            .map_err(|e| anyhow::anyhow!("Failed to enable raw mode: {}", e))?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)
            .map_err(|e| anyhow::anyhow!("Failed to setup terminal: {}", e))?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)
            .map_err(|e| anyhow::anyhow!("Failed to create terminal: {}", e))?;

        let result = self.run_loop(&mut terminal).await;

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        for handle in self.inflight.drain(..) {
            handle.abort();
        }

        result
    }

    async fn run_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        let mut last_tick = Instant::now();

        loop {
            terminal.draw(|f| self.render(f))?;

            let timeout = TICK_RATE
                .checked_sub(last_tick.elapsed())
                .unwrap_or_else(|| Duration::from_secs(0));

            if event::poll(timeout)? {
                if let Event::Key(key) = event::read()? {
                    if let Some(intent) =
                        map_key(key, self.view.focused_pane, self.view.settings.open)
                    {
                        self.handle_intent(intent, Instant::now());
                    }
                }
            }

            if last_tick.elapsed() >= TICK_RATE {
                self.tick(Instant::now());
                last_tick = Instant::now();
            }

            if self.should_quit {
                tracing::info!("Quit requested");
                return Ok(());
            }

            // Let background submissions make progress between frames
            tokio::task::yield_now().await;
        }
    }
}

/// Move a list cursor by `delta`, clamped to `0..count`
fn step(cursor: Option<usize>, delta: isize, count: usize) -> Option<usize> {
    if count == 0 {
        return None;
    }
    let next = match cursor {
        None if delta < 0 => count - 1,
        None => 0,
        Some(current) => (current as isize + delta).clamp(0, count as isize - 1) as usize,
    };
    Some(next)
}
