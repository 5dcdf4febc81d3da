//! Submission controller
//!
//! Drives one submission cycle against the [`QueryStore`]: validate, mark
//! loading, record history, fetch, then store results or an error together
//! with the end of loading. A drop guard ends loading if the task is aborted
//! before it completes.

use crate::backend::{FetchError, QueryBackend};
use crate::tea::{QueryAction, QueryStore};
use futures::FutureExt;
use serde::{Deserialize, Serialize};
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::task::JoinHandle;

/// How completions of overlapping submissions are applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionPolicy {
    /// Every completion is applied in resolution order, so a slow early
    /// query can overwrite a faster later one
    #[default]
    LastWriteWins,

    /// Only the most recently started submission may write its outcome
    LatestOnly,
}

/// What a submission ended up doing to the store
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Blank query, nothing happened
    Ignored,

    /// Results were stored
    Completed,

    /// The error was stored
    Failed(FetchError),

    /// A newer submission had started, so the outcome was dropped
    Superseded,
}

/// A started submission whose fetch has not run yet
#[derive(Debug)]
pub struct Submission {
    query: String,
    finalizer: LoadingFinalizer,
}

impl Submission {
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn generation(&self) -> u64 {
        self.finalizer.generation
    }
}

/// Ends the cycle exactly once: either through [`LoadingFinalizer::complete`]
/// or, if the submission is dropped unfinished, with `SetLoading(false)`
#[derive(Debug)]
struct LoadingFinalizer {
    store: QueryStore,
    latest: Arc<AtomicU64>,
    policy: CompletionPolicy,
    generation: u64,
    armed: bool,
}

impl LoadingFinalizer {
    /// Must run under the store lock, where generations are also claimed
    fn may_write(&self) -> bool {
        match self.policy {
            CompletionPolicy::LastWriteWins => true,
            CompletionPolicy::LatestOnly => {
                self.latest.load(Ordering::SeqCst) == self.generation
            }
        }
    }

    /// Apply the outcome and `SetLoading(false)` as one store step.
    /// Returns false if a newer submission superseded this one.
    fn complete(mut self, outcome: QueryAction) -> bool {
        self.armed = false;
        self.store
            .dispatch_if(|_| self.may_write(), [outcome, QueryAction::SetLoading(false)])
    }
}

impl Drop for LoadingFinalizer {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let applied = self
            .store
            .dispatch_if(|_| self.may_write(), [QueryAction::SetLoading(false)]);
        if !applied {
            tracing::debug!(
                generation = self.generation,
                "Superseded submission leaves loading to the newer one"
            );
        }
    }
}

/// Orchestrates submission cycles against a backend
#[derive(Clone)]
pub struct SubmissionController {
    store: QueryStore,
    backend: Arc<dyn QueryBackend>,
    policy: CompletionPolicy,
    latest: Arc<AtomicU64>,
}

impl std::fmt::Debug for SubmissionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubmissionController")
            .field("backend", &self.backend.name())
            .field("policy", &self.policy)
            .field("latest", &self.latest.load(Ordering::SeqCst))
            .finish()
    }
}

impl SubmissionController {
    /// Create a controller with the default last-write-wins policy
    pub fn new(store: QueryStore, backend: Arc<dyn QueryBackend>) -> Self {
        Self {
            store,
            backend,
            policy: CompletionPolicy::default(),
            latest: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn with_policy(mut self, policy: CompletionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn store(&self) -> &QueryStore {
        &self.store
    }

    /// Generation number of the most recently started submission
    pub fn latest_generation(&self) -> u64 {
        self.latest.load(Ordering::SeqCst)
    }

    /// Synchronous half of a submission: hide suggestions, start loading and
    /// record the attempt in history. Returns `None` for a blank query.
    pub fn begin(&self, query: &str) -> Option<Submission> {
        if query.trim().is_empty() {
            tracing::debug!("Ignoring blank query submission");
            return None;
        }

        // Claim the generation under the store lock so a completion's
        // supersession check never interleaves with a newer begin
        let mut generation = 0;
        self.store.dispatch_if(
            |_| {
                generation = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
                true
            },
            [
                QueryAction::HideSuggestions,
                QueryAction::SetLoading(true),
                QueryAction::AddToHistory(query.to_string()),
            ],
        );
        tracing::info!(generation, query, "Submitting query");

        Some(Submission {
            query: query.to_string(),
            finalizer: LoadingFinalizer {
                store: self.store.clone(),
                latest: Arc::clone(&self.latest),
                policy: self.policy,
                generation,
                armed: true,
            },
        })
    }

    /// Asynchronous half: fetch, then store the outcome and end loading in
    /// a single transition
    pub async fn run(&self, submission: Submission) -> SubmitOutcome {
        let Submission { query, finalizer } = submission;
        let generation = finalizer.generation;

        let fetched = AssertUnwindSafe(self.backend.fetch(&query))
            .catch_unwind()
            .await
            .unwrap_or_else(|_| {
                tracing::error!(query = %query, "Query backend panicked");
                Err(FetchError::internal("backend panicked"))
            });

        let (action, outcome) = match fetched {
            Ok(series) => {
                tracing::info!(generation, points = series.len(), "Query completed");
                (QueryAction::SetResults(series), SubmitOutcome::Completed)
            }
            Err(err) => {
                tracing::warn!(generation, "Error processing query '{}': {}", query, err);
                (
                    QueryAction::SetError(err.display_message()),
                    SubmitOutcome::Failed(err),
                )
            }
        };

        if !finalizer.complete(action) {
            tracing::debug!(generation, "Dropping outcome of superseded submission");
            return SubmitOutcome::Superseded;
        }
        outcome
    }

    /// Run a full submission cycle, suspending until the fetch resolves
    pub async fn submit(&self, query: &str) -> SubmitOutcome {
        match self.begin(query) {
            Some(submission) => self.run(submission).await,
            None => SubmitOutcome::Ignored,
        }
    }

    /// Start a submission now and finish it on a background task
    pub fn spawn(&self, query: &str) -> Option<JoinHandle<SubmitOutcome>> {
        let submission = self.begin(query)?;
        let controller = self.clone();
        Some(tokio::spawn(async move { controller.run(submission).await }))
    }
}
