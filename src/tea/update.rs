//! Update function for TEA pattern
//!
//! Central reducer that applies a [`QueryAction`] to a [`QueryState`]. Every
//! transition is total and synchronous; nothing here touches time or IO.

use crate::tea::message::QueryAction;
use crate::tea::model::{QueryState, QueryStatus, SuggestionPanel};

/// Main update function that consumes a state and returns the next one
pub fn update(mut state: QueryState, action: QueryAction) -> QueryState {
    apply(&mut state, action);
    state
}

/// In-place form of [`update`], used by the store under its lock
pub(crate) fn apply(state: &mut QueryState, action: QueryAction) {
    match action {
        QueryAction::SetCurrentQuery(text) => {
            state.current_query = text;
        }

        QueryAction::AddToHistory(text) => {
            if text.trim().is_empty() {
                tracing::debug!("Ignoring blank history entry");
                return;
            }
            // Append-only; ClearHistory is the only removal
            state.query_history.push(text);
        }

        QueryAction::SetLoading(true) => {
            state.status = QueryStatus::Pending { failure: None };
        }

        QueryAction::SetLoading(false) => {
            if let QueryStatus::Pending { failure } = &mut state.status {
                state.status = match failure.take() {
                    Some(message) => QueryStatus::Failed(message),
                    None if state.results.is_some() => QueryStatus::Ready,
                    None => QueryStatus::Idle,
                };
            }
        }

        QueryAction::SetResults(series) => {
            state.results = Some(series);
            state.status = match state.status {
                QueryStatus::Pending { .. } => QueryStatus::Pending { failure: None },
                _ => QueryStatus::Ready,
            };
        }

        QueryAction::SetError(message) => {
            // While pending the failure is held until loading ends
            match &mut state.status {
                QueryStatus::Pending { failure } => *failure = Some(message),
                status => *status = QueryStatus::Failed(message),
            }
        }

        QueryAction::ClearHistory => {
            state.query_history.clear();
        }

        QueryAction::ShowSuggestions => {
            state.suggestion_panel = SuggestionPanel::Shown;
        }

        QueryAction::HideSuggestions => {
            state.suggestion_panel = SuggestionPanel::Hidden;
        }

        QueryAction::SelectSuggestion(text) => {
            state.current_query = text;
            state.suggestion_panel = SuggestionPanel::Hidden;
        }

        QueryAction::SelectHistory(index) => match state.query_history.get(index) {
            Some(query) => state.current_query = query.clone(),
            None => tracing::debug!("History index {} out of range", index),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tea::model::DataPoint;

    fn series(n: usize) -> Vec<DataPoint> {
        (0..n)
            .map(|i| DataPoint::new(format!("Day {}", i + 1), i as f64))
            .collect()
    }

    fn run(actions: Vec<QueryAction>) -> QueryState {
        actions
            .into_iter()
            .fold(QueryState::default(), update)
    }

    #[test]
    fn test_set_current_query_twice_is_idempotent() {
        let once = run(vec![QueryAction::SetCurrentQuery("x".into())]);
        let twice = run(vec![
            QueryAction::SetCurrentQuery("x".into()),
            QueryAction::SetCurrentQuery("x".into()),
        ]);
        assert_eq!(once, twice);
        assert!(twice.query_history.is_empty());
    }

    #[test]
    fn test_history_keeps_duplicates_in_order() {
        let state = run(vec![
            QueryAction::AddToHistory("a".into()),
            QueryAction::AddToHistory("b".into()),
            QueryAction::AddToHistory("a".into()),
        ]);
        assert_eq!(state.query_history, vec!["a", "b", "a"]);
    }

    #[test]
    fn test_blank_history_entry_ignored() {
        let state = run(vec![
            QueryAction::AddToHistory("".into()),
            QueryAction::AddToHistory("  \t".into()),
        ]);
        assert!(state.query_history.is_empty());
    }

    #[test]
    fn test_history_never_evicts() {
        let mut state = QueryState::default();
        for i in 0..200 {
            state = update(state, QueryAction::AddToHistory(format!("q{}", i)));
        }
        assert_eq!(state.query_history.len(), 200);
        assert_eq!(state.query_history[0], "q0");
    }

    #[test]
    fn test_success_cycle() {
        let state = run(vec![
            QueryAction::SetLoading(true),
            QueryAction::SetResults(series(7)),
        ]);
        assert!(state.is_loading());

        let state = update(state, QueryAction::SetLoading(false));
        assert!(!state.is_loading());
        assert_eq!(state.status, QueryStatus::Ready);
        assert_eq!(state.results.as_ref().map(Vec::len), Some(7));
    }

    #[test]
    fn test_failure_keeps_previous_results() {
        let state = run(vec![
            QueryAction::SetResults(series(3)),
            QueryAction::SetLoading(true),
            QueryAction::SetError("backend down".into()),
        ]);
        // Still loading until the finalizer runs
        assert!(state.is_loading());
        assert!(state.error().is_none());

        let state = update(state, QueryAction::SetLoading(false));
        assert_eq!(state.error(), Some("backend down"));
        assert_eq!(state.results, Some(series(3)));
    }

    #[test]
    fn test_set_error_outside_cycle_fails_immediately() {
        let state = run(vec![QueryAction::SetError("oops".into())]);
        assert_eq!(state.error(), Some("oops"));
        assert!(!state.is_loading());
    }

    #[test]
    fn test_next_submit_and_success_clear_error() {
        let failed = run(vec![QueryAction::SetError("oops".into())]);

        let resubmitted = update(failed.clone(), QueryAction::SetLoading(true));
        assert!(resubmitted.error().is_none());

        let succeeded = update(failed, QueryAction::SetResults(series(2)));
        assert!(succeeded.error().is_none());
        assert_eq!(succeeded.status, QueryStatus::Ready);
    }

    #[test]
    fn test_loading_false_without_results_returns_to_idle() {
        let state = run(vec![
            QueryAction::SetLoading(true),
            QueryAction::SetLoading(false),
        ]);
        assert_eq!(state.status, QueryStatus::Idle);
    }

    #[test]
    fn test_redundant_set_loading_true_is_valid() {
        let state = run(vec![
            QueryAction::SetLoading(true),
            QueryAction::SetLoading(true),
        ]);
        assert!(state.is_loading());
    }

    #[test]
    fn test_suggestion_selection_fills_input_and_hides_panel() {
        let state = run(vec![
            QueryAction::ShowSuggestions,
            QueryAction::SelectSuggestion("Compare revenue by region".into()),
        ]);
        assert_eq!(state.current_query, "Compare revenue by region");
        assert!(!state.suggestions_visible());
        assert!(state.query_history.is_empty());
    }

    #[test]
    fn test_select_history_recalls_entry() {
        let state = run(vec![
            QueryAction::AddToHistory("first".into()),
            QueryAction::AddToHistory("second".into()),
            QueryAction::SelectHistory(0),
        ]);
        assert_eq!(state.current_query, "first");

        let state = update(state, QueryAction::SelectHistory(9));
        assert_eq!(state.current_query, "first");
    }

    #[test]
    fn test_clear_history() {
        let state = run(vec![
            QueryAction::AddToHistory("a".into()),
            QueryAction::ClearHistory,
        ]);
        assert!(state.query_history.is_empty());
    }

    #[test]
    fn test_typing_never_touches_results() {
        let state = run(vec![
            QueryAction::SetResults(series(4)),
            QueryAction::SetCurrentQuery("s".into()),
            QueryAction::SetCurrentQuery("sa".into()),
            QueryAction::SetCurrentQuery("".into()),
        ]);
        assert_eq!(state.results, Some(series(4)));
        assert_eq!(state.status, QueryStatus::Ready);
    }
}
