//! Mock query backend
//!
//! Stands in for a real analytics service: waits a while, then returns a
//! week of random daily values. Tests and demos can script per-query
//! latency, data, or failures.

use crate::backend::error::{FetchError, FetchResult};
use crate::backend::QueryBackend;
use crate::tea::DataPoint;
use async_trait::async_trait;
use rand::Rng;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// Number of points in a generated series
pub const MOCK_SERIES_LEN: usize = 7;

/// Default simulated latency
pub const DEFAULT_MOCK_LATENCY: Duration = Duration::from_millis(1500);

/// Mock backend behavior configuration
#[derive(Debug, Clone)]
pub struct MockBackendBehavior {
    /// Simulated latency for unscripted queries
    pub latency: Duration,
    /// Probability that an unscripted query fails, 0.0 to 1.0
    pub failure_rate: f32,
    /// Exact-match overrides keyed by query text
    pub scripted: HashMap<String, ScriptedResponse>,
}

impl Default for MockBackendBehavior {
    fn default() -> Self {
        Self {
            latency: DEFAULT_MOCK_LATENCY,
            failure_rate: 0.0,
            scripted: HashMap::new(),
        }
    }
}

/// Canned answer for one query
#[derive(Debug, Clone, Default)]
pub struct ScriptedResponse {
    /// Overrides the default latency
    pub latency: Option<Duration>,
    /// Fixed series instead of random values
    pub series: Option<Vec<DataPoint>>,
    /// Fail with this error instead of returning data
    pub error: Option<FetchError>,
}

impl ScriptedResponse {
    /// Respond with a fixed series after a delay
    pub fn series(latency: Duration, series: Vec<DataPoint>) -> Self {
        Self {
            latency: Some(latency),
            series: Some(series),
            error: None,
        }
    }

    /// Fail after a delay
    pub fn failure(latency: Duration, error: FetchError) -> Self {
        Self {
            latency: Some(latency),
            series: None,
            error: Some(error),
        }
    }
}

/// Mock backend for development and testing
#[derive(Debug, Clone)]
pub struct MockBackend {
    behavior: Arc<RwLock<MockBackendBehavior>>,
    calls: Arc<RwLock<Vec<String>>>,
}

impl MockBackend {
    /// Create a mock backend with default behavior
    pub fn new() -> Self {
        Self::with_behavior(MockBackendBehavior::default())
    }

    /// Create a mock backend with specific behavior
    pub fn with_behavior(behavior: MockBackendBehavior) -> Self {
        Self {
            behavior: Arc::new(RwLock::new(behavior)),
            calls: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Set simulated latency
    pub async fn set_latency(&self, latency: Duration) {
        self.behavior.write().await.latency = latency;
    }

    /// Set failure probability for unscripted queries
    pub async fn set_failure_rate(&self, rate: f32) {
        self.behavior.write().await.failure_rate = rate.clamp(0.0, 1.0);
    }

    /// Script the answer for an exact query
    pub async fn script(&self, query: impl Into<String>, response: ScriptedResponse) {
        self.behavior
            .write()
            .await
            .scripted
            .insert(query.into(), response);
    }

    /// Queries received so far, in call order
    pub async fn calls(&self) -> Vec<String> {
        self.calls.read().await.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.calls.read().await.len()
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Seven days of integer values in `[0, 100)`
pub fn random_series() -> Vec<DataPoint> {
    let mut rng = rand::thread_rng();
    (0..MOCK_SERIES_LEN)
        .map(|i| DataPoint::new(format!("Day {}", i + 1), rng.gen_range(0..100) as f64))
        .collect()
}

fn roll_failure(rate: f32) -> bool {
    rate > 0.0 && rand::thread_rng().gen::<f32>() < rate
}

#[async_trait]
impl QueryBackend for MockBackend {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch(&self, query: &str) -> FetchResult<Vec<DataPoint>> {
        self.calls.write().await.push(query.to_string());

        let (latency, scripted, failure_rate) = {
            let behavior = self.behavior.read().await;
            let scripted = behavior.scripted.get(query).cloned();
            let latency = scripted
                .as_ref()
                .and_then(|s| s.latency)
                .unwrap_or(behavior.latency);
            (latency, scripted, behavior.failure_rate)
        };

        if latency > Duration::ZERO {
            tokio::time::sleep(latency).await;
        }

        match scripted {
            Some(ScriptedResponse {
                error: Some(error), ..
            }) => Err(error),
            Some(ScriptedResponse {
                series: Some(series),
                ..
            }) => Ok(series),
            _ if roll_failure(failure_rate) => {
                tracing::debug!("Mock backend simulating failure for '{}'", query);
                Err(FetchError::unavailable("simulated outage"))
            }
            _ => Ok(random_series()),
        }
    }
}
