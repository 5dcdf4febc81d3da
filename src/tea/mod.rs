//! The Elm Architecture (TEA) pattern implementation for the dashboard
//!
//! This module provides a structured approach to state management following
//! the Model-Update-View pattern from Elm: the model is plain data, actions
//! are messages, and the update function is the only place state changes.

pub mod message;
pub mod model;
pub mod store;
pub mod update;

pub use message::QueryAction;
pub use model::{DataPoint, QueryState, QueryStatus, SuggestionPanel, DEFAULT_SUGGESTIONS};
pub use store::QueryStore;
pub use update::update;
