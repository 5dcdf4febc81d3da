//! Central message type for the dashboard following TEA pattern
//!
//! Every change to [`QueryState`](crate::tea::QueryState) is expressed as one
//! of these actions and applied by the update function.

use crate::tea::model::DataPoint;

/// Transition actions accepted by the query store
#[derive(Debug, Clone, PartialEq)]
pub enum QueryAction {
    /// Replace the live input text
    SetCurrentQuery(String),

    /// Append a submitted query to the history
    AddToHistory(String),

    /// Mark a submission as started or finished
    SetLoading(bool),

    /// Store a successful series and clear any error
    SetResults(Vec<DataPoint>),

    /// Record a failed submission, keeping the last results
    SetError(String),

    /// Drop every history entry
    ClearHistory,

    /// Open the suggestion dropdown
    ShowSuggestions,

    /// Close the suggestion dropdown
    HideSuggestions,

    /// Pick a suggestion: fills the input and closes the dropdown
    SelectSuggestion(String),

    /// Recall a history entry into the input
    SelectHistory(usize),
}

impl QueryAction {
    /// Short label used in trace output
    pub fn name(&self) -> &'static str {
        match self {
            QueryAction::SetCurrentQuery(_) => "set_current_query",
            QueryAction::AddToHistory(_) => "add_to_history",
            QueryAction::SetLoading(_) => "set_loading",
            QueryAction::SetResults(_) => "set_results",
            QueryAction::SetError(_) => "set_error",
            QueryAction::ClearHistory => "clear_history",
            QueryAction::ShowSuggestions => "show_suggestions",
            QueryAction::HideSuggestions => "hide_suggestions",
            QueryAction::SelectSuggestion(_) => "select_suggestion",
            QueryAction::SelectHistory(_) => "select_history",
        }
    }
}
