//! Query store
//!
//! Owns the single [`QueryState`] and applies [`QueryAction`]s atomically.
//! Readers either take a snapshot or subscribe to change notifications.

use crate::tea::message::QueryAction;
use crate::tea::model::QueryState;
use crate::tea::update::apply;
use std::sync::Arc;
use tokio::sync::watch;

/// Reducer-style state container shared by the controller and the UI
#[derive(Debug, Clone)]
pub struct QueryStore {
    sender: Arc<watch::Sender<QueryState>>,
}

impl QueryStore {
    /// Create a store holding the given initial state
    pub fn new(initial: QueryState) -> Self {
        let (sender, _receiver) = watch::channel(initial);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Apply one transition and notify subscribers
    pub fn dispatch(&self, action: QueryAction) {
        tracing::trace!(action = action.name(), "Dispatching query action");
        self.sender.send_modify(|state| apply(state, action));
    }

    /// Apply several transitions as a single atomic step
    pub fn dispatch_all(&self, actions: impl IntoIterator<Item = QueryAction>) {
        self.sender.send_modify(|state| {
            for action in actions {
                tracing::trace!(action = action.name(), "Dispatching query action");
                apply(state, action);
            }
        });
    }

    /// Apply `actions` as one atomic step if `guard` holds once the store
    /// lock is taken. Subscribers are only notified when they were applied.
    pub fn dispatch_if(
        &self,
        guard: impl FnOnce(&QueryState) -> bool,
        actions: impl IntoIterator<Item = QueryAction>,
    ) -> bool {
        self.sender.send_if_modified(|state| {
            if !guard(state) {
                return false;
            }
            for action in actions {
                tracing::trace!(action = action.name(), "Dispatching query action");
                apply(state, action);
            }
            true
        })
    }

    /// Cloned view of the current state
    pub fn snapshot(&self) -> QueryState {
        self.sender.borrow().clone()
    }

    /// Read a value out of the current state without cloning all of it
    pub fn read<R>(&self, f: impl FnOnce(&QueryState) -> R) -> R {
        f(&self.sender.borrow())
    }

    /// Receiver that is woken after every dispatched transition
    pub fn subscribe(&self) -> watch::Receiver<QueryState> {
        self.sender.subscribe()
    }
}

impl Default for QueryStore {
    fn default() -> Self {
        Self::new(QueryState::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tea::model::DataPoint;

    #[test]
    fn test_dispatch_updates_snapshot() {
        let store = QueryStore::default();
        store.dispatch(QueryAction::SetCurrentQuery("revenue".into()));
        assert_eq!(store.snapshot().current_query, "revenue");
        assert_eq!(store.read(|s| s.current_query.len()), 7);
    }

    #[test]
    fn test_clones_share_state() {
        let store = QueryStore::default();
        let other = store.clone();
        other.dispatch(QueryAction::AddToHistory("q".into()));
        assert_eq!(store.snapshot().query_history, vec!["q"]);
    }

    #[test]
    fn test_dispatch_if_rejected_guard_changes_nothing() {
        let store = QueryStore::default();
        let mut rx = store.subscribe();
        rx.borrow_and_update();

        let applied = store.dispatch_if(|s| s.is_loading(), [QueryAction::SetLoading(false)]);
        assert!(!applied);
        assert!(!rx.has_changed().unwrap());

        store.dispatch(QueryAction::SetLoading(true));
        rx.borrow_and_update();
        let applied = store.dispatch_if(
            |s| s.is_loading(),
            [QueryAction::SetError("down".into()), QueryAction::SetLoading(false)],
        );
        assert!(applied);
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().error(), Some("down"));
    }

    #[test]
    fn test_dispatch_all_is_one_notification() {
        let store = QueryStore::default();
        let mut rx = store.subscribe();
        rx.borrow_and_update();

        store.dispatch_all([
            QueryAction::SetLoading(true),
            QueryAction::SetResults(vec![DataPoint::new("Day 1", 1.0)]),
            QueryAction::SetLoading(false),
        ]);

        assert!(rx.has_changed().unwrap());
        let seen = rx.borrow_and_update().clone();
        assert!(!seen.is_loading());
        assert!(seen.results.is_some());
        assert!(!rx.has_changed().unwrap());
    }

    #[tokio::test]
    async fn test_subscriber_is_notified() {
        let store = QueryStore::default();
        let mut rx = store.subscribe();

        let writer = store.clone();
        tokio::spawn(async move {
            writer.dispatch(QueryAction::ShowSuggestions);
        });

        rx.changed().await.unwrap();
        assert!(rx.borrow().suggestions_visible());
    }
}
