//! Query backend boundary
//!
//! The dashboard only depends on [`QueryBackend::fetch`]: a query string in,
//! a time series (or a failure) out. Transport is up to the implementor.

pub mod error;
pub mod mock;

pub use error::{FetchError, FetchResult};
pub use mock::{MockBackend, MockBackendBehavior, ScriptedResponse};

use crate::tea::DataPoint;
use async_trait::async_trait;

/// Core trait that every data source must implement
#[async_trait]
pub trait QueryBackend: Send + Sync {
    /// Backend name for logging
    fn name(&self) -> &str;

    /// Resolve a natural-language query into a time series
    async fn fetch(&self, query: &str) -> FetchResult<Vec<DataPoint>>;
}
