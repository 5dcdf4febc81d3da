use async_trait::async_trait;
use querydash::backend::{
    FetchError, FetchResult, MockBackend, MockBackendBehavior, QueryBackend, ScriptedResponse,
};
use querydash::submission::{CompletionPolicy, SubmissionController, SubmitOutcome};
use querydash::tea::{DataPoint, QueryState, QueryStore};
use querydash::timing::TypingIndicator;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{sleep, Instant};

fn series(tag: &str) -> Vec<DataPoint> {
    (1..=7)
        .map(|d| DataPoint::new(format!("{} {}", tag, d), d as f64))
        .collect()
}

fn controller(backend: &MockBackend, policy: CompletionPolicy) -> SubmissionController {
    let store = QueryStore::new(QueryState::default());
    SubmissionController::new(store, Arc::new(backend.clone())).with_policy(policy)
}

fn fast_backend() -> MockBackend {
    MockBackend::with_behavior(MockBackendBehavior {
        latency: Duration::from_millis(100),
        ..MockBackendBehavior::default()
    })
}

#[tokio::test(start_paused = true)]
async fn test_submit_marks_loading_then_stores_results() {
    let backend = fast_backend();
    let controller = controller(&backend, CompletionPolicy::LastWriteWins);
    let store = controller.store().clone();

    let handle = controller.spawn("sales trend").unwrap();

    let state = store.snapshot();
    assert!(state.is_loading());
    assert_eq!(state.query_history, vec!["sales trend".to_string()]);
    assert_eq!(state.error(), None);

    assert_eq!(handle.await.unwrap(), SubmitOutcome::Completed);

    let state = store.snapshot();
    assert!(!state.is_loading());
    let results = state.results.unwrap();
    assert_eq!(results.len(), 7);
    assert!(results.iter().all(|p| (0.0..100.0).contains(&p.value)));
    assert_eq!(backend.calls().await, vec!["sales trend".to_string()]);
}

#[tokio::test(start_paused = true)]
async fn test_blank_submissions_change_nothing() {
    let backend = fast_backend();
    let controller = controller(&backend, CompletionPolicy::LastWriteWins);
    let before = controller.store().snapshot();

    for query in ["", "   ", "\t\n"] {
        assert_eq!(controller.submit(query).await, SubmitOutcome::Ignored);
    }

    assert_eq!(controller.store().snapshot(), before);
    assert_eq!(backend.call_count().await, 0);
}

#[tokio::test(start_paused = true)]
async fn test_every_submission_is_recorded() {
    let backend = fast_backend();
    let controller = controller(&backend, CompletionPolicy::LastWriteWins);

    let handles: Vec<_> = ["one", "two", "one", "three"]
        .iter()
        .filter_map(|q| controller.spawn(q))
        .collect();
    for handle in handles {
        handle.await.unwrap();
    }

    let state = controller.store().snapshot();
    assert_eq!(state.query_history, vec!["one", "two", "one", "three"]);
    assert!(!state.is_loading());
}

#[tokio::test(start_paused = true)]
async fn test_failure_keeps_results_until_next_success() {
    let backend = fast_backend();
    backend
        .script("good", ScriptedResponse::series(Duration::from_millis(50), series("good")))
        .await;
    backend
        .script(
            "bad",
            ScriptedResponse::failure(Duration::from_millis(50), FetchError::unavailable("down")),
        )
        .await;
    backend
        .script("better", ScriptedResponse::series(Duration::from_millis(50), series("better")))
        .await;
    let controller = controller(&backend, CompletionPolicy::LastWriteWins);
    let store = controller.store().clone();

    controller.submit("good").await;
    let outcome = controller.submit("bad").await;
    assert!(matches!(outcome, SubmitOutcome::Failed(FetchError::Unavailable { .. })));

    let state = store.snapshot();
    assert!(!state.is_loading());
    assert_eq!(
        state.error(),
        Some("Failed to process query: query backend is unavailable: down")
    );
    assert_eq!(state.results, Some(series("good")));

    assert_eq!(controller.submit("better").await, SubmitOutcome::Completed);
    let state = store.snapshot();
    assert_eq!(state.error(), None);
    assert_eq!(state.results, Some(series("better")));
    assert_ne!(state.results, Some(series("good")));
}

#[tokio::test(start_paused = true)]
async fn test_error_hidden_while_a_newer_submission_loads() {
    let backend = fast_backend();
    backend
        .script(
            "bad",
            ScriptedResponse::failure(Duration::from_millis(50), FetchError::invalid_query("?")),
        )
        .await;
    let controller = controller(&backend, CompletionPolicy::LastWriteWins);
    let store = controller.store().clone();

    let bad = controller.spawn("bad").unwrap();
    let slow = controller.spawn("slow").unwrap();

    sleep(Duration::from_millis(60)).await;
    // The failed fetch ended loading even though "slow" is still running
    let state = store.snapshot();
    assert!(!state.is_loading());
    assert!(state.error().is_some());

    bad.await.unwrap();
    slow.await.unwrap();
    let state = store.snapshot();
    assert_eq!(state.error(), None);
    assert_eq!(state.results.map(|r| r.len()), Some(7));
}

async fn race(policy: CompletionPolicy) -> (QueryStore, SubmitOutcome, QueryState) {
    let backend = fast_backend();
    backend
        .script("a", ScriptedResponse::series(Duration::from_millis(1000), series("A")))
        .await;
    backend
        .script("b", ScriptedResponse::series(Duration::from_millis(100), series("B")))
        .await;
    let controller = controller(&backend, policy);
    let store = controller.store().clone();

    let slow = controller.spawn("a").unwrap();
    let fast = controller.spawn("b").unwrap();

    sleep(Duration::from_millis(150)).await;
    let midway = store.snapshot();
    assert_eq!(fast.await.unwrap(), SubmitOutcome::Completed);

    let slow_outcome = slow.await.unwrap();
    (store, slow_outcome, midway)
}

#[tokio::test(start_paused = true)]
async fn test_race_last_write_wins() {
    let (store, slow_outcome, midway) = race(CompletionPolicy::LastWriteWins).await;

    assert_eq!(midway.results, Some(series("B")));
    assert!(!midway.is_loading());

    assert_eq!(slow_outcome, SubmitOutcome::Completed);
    let state = store.snapshot();
    assert_eq!(state.results, Some(series("A")));
    assert!(!state.is_loading());
    assert_eq!(state.query_history, vec!["a", "b"]);
}

#[tokio::test(start_paused = true)]
async fn test_race_latest_only() {
    let (store, slow_outcome, midway) = race(CompletionPolicy::LatestOnly).await;

    assert_eq!(midway.results, Some(series("B")));
    assert!(!midway.is_loading());

    assert_eq!(slow_outcome, SubmitOutcome::Superseded);
    let state = store.snapshot();
    assert_eq!(state.results, Some(series("B")));
    assert!(!state.is_loading());
}

/// Backend whose fetch never resolves
struct HungBackend;

#[async_trait]
impl QueryBackend for HungBackend {
    fn name(&self) -> &str {
        "hung"
    }

    async fn fetch(&self, _query: &str) -> FetchResult<Vec<DataPoint>> {
        futures::future::pending().await
    }
}

#[tokio::test(start_paused = true)]
async fn test_hung_fetch_keeps_loading_indefinitely() {
    let controller = SubmissionController::new(QueryStore::default(), Arc::new(HungBackend));
    let store = controller.store().clone();

    let handle = controller.spawn("never answers").unwrap();

    // No timeout exists, so a day later the cycle is still pending
    sleep(Duration::from_secs(24 * 60 * 60)).await;
    let state = store.snapshot();
    assert!(state.is_loading());
    assert_eq!(state.results, None);
    assert_eq!(state.error(), None);
    assert!(!handle.is_finished());

    // Aborting the task is the only way out
    handle.abort();
    assert!(handle.await.unwrap_err().is_cancelled());
    assert!(!store.snapshot().is_loading());
}

#[tokio::test(start_paused = true)]
async fn test_typing_indicator_debounce() {
    let mut indicator = TypingIndicator::new(Duration::from_millis(500));
    let start = Instant::now();

    indicator.on_input("s", start);
    indicator.on_input("sa", start + Duration::from_millis(400));

    indicator.tick(start + Duration::from_millis(899));
    assert!(indicator.is_typing());

    assert!(indicator.tick(start + Duration::from_millis(900)));
    assert!(!indicator.is_typing());
}

#[tokio::test(start_paused = true)]
async fn test_subscribers_see_loading_transitions() {
    let backend = fast_backend();
    let controller = controller(&backend, CompletionPolicy::LastWriteWins);
    let mut rx = controller.store().subscribe();

    let handle = controller.spawn("revenue").unwrap();
    assert!(rx.borrow_and_update().is_loading());

    rx.changed().await.unwrap();
    handle.await.unwrap();
    let state = rx.borrow_and_update().clone();
    assert!(!state.is_loading());
    assert!(state.results.is_some());
}
