//! Application model following TEA pattern
//!
//! `QueryState` is the single source of truth for the dashboard. It is only
//! ever changed by [`crate::tea::update`], and readers get cloned snapshots.

use serde::{Deserialize, Serialize};

/// One labelled sample of a returned time series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub name: String,
    pub value: f64,
}

impl DataPoint {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Lifecycle of the submission cycle as seen by the results panel
#[derive(Debug, Clone, PartialEq, Default)]
pub enum QueryStatus {
    /// Nothing submitted yet, or loading ended without results
    #[default]
    Idle,

    /// A submission is outstanding. A failure reported before loading
    /// ends is held here so the banner never shows beside the spinner.
    Pending { failure: Option<String> },

    /// The last completed cycle produced results
    Ready,

    /// The last completed cycle failed with a display message
    Failed(String),
}

/// Visibility of the suggestion dropdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SuggestionPanel {
    #[default]
    Hidden,
    Shown,
}

/// Queries offered in the dropdown when no configuration overrides them
pub const DEFAULT_SUGGESTIONS: &[&str] = &[
    "Show me sales trends for the last quarter",
    "Compare revenue by region",
    "What are our top performing products?",
    "Analyze customer satisfaction scores",
    "Show monthly user growth",
];

/// Main dashboard model containing all authoritative state
#[derive(Debug, Clone, PartialEq)]
pub struct QueryState {
    /// Live input text
    pub current_query: String,

    /// Submitted queries, most recent last
    pub query_history: Vec<String>,

    /// Read-only suggestion list
    pub suggestions: Vec<String>,

    /// Where the current submission cycle stands
    pub status: QueryStatus,

    /// Last successful series; survives later failures
    pub results: Option<Vec<DataPoint>>,

    /// Suggestion dropdown visibility
    pub suggestion_panel: SuggestionPanel,
}

impl Default for QueryState {
    fn default() -> Self {
        Self::new(DEFAULT_SUGGESTIONS.iter().map(|s| s.to_string()).collect())
    }
}

impl QueryState {
    /// Create an empty state with the given suggestions
    pub fn new(suggestions: Vec<String>) -> Self {
        Self {
            current_query: String::new(),
            query_history: Vec::new(),
            suggestions,
            status: QueryStatus::Idle,
            results: None,
            suggestion_panel: SuggestionPanel::Hidden,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.status, QueryStatus::Pending { .. })
    }

    /// Error banner text, present only after a failed cycle
    pub fn error(&self) -> Option<&str> {
        match &self.status {
            QueryStatus::Failed(message) => Some(message.as_str()),
            _ => None,
        }
    }

    /// Whether the input holds something worth submitting
    pub fn can_submit(&self) -> bool {
        !self.current_query.trim().is_empty()
    }

    pub fn suggestions_visible(&self) -> bool {
        self.suggestion_panel == SuggestionPanel::Shown
    }
}
