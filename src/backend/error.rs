//! Fetch error types and handling

use std::time::Duration;
use thiserror::Error;

/// Result type for backend fetches
pub type FetchResult<T> = Result<T, FetchError>;

/// Ways the query backend can fail
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    #[error("query backend is unavailable: {message}")]
    Unavailable { message: String },

    #[error("query could not be understood: {reason}")]
    InvalidQuery { reason: String },

    #[error("query backend timed out after {timeout:?}")]
    Timeout { timeout: Duration },

    #[error("query backend internal error: {message}")]
    Internal { message: String },
}

impl FetchError {
    /// Create an unavailable error
    pub fn unavailable(message: impl Into<String>) -> Self {
        FetchError::Unavailable {
            message: message.into(),
        }
    }

    /// Create an invalid query error
    pub fn invalid_query(reason: impl Into<String>) -> Self {
        FetchError::InvalidQuery {
            reason: reason.into(),
        }
    }

    /// Create a timeout error
    pub fn timeout(timeout: Duration) -> Self {
        FetchError::Timeout { timeout }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        FetchError::Internal {
            message: message.into(),
        }
    }

    /// Message shown in the results panel error banner
    pub fn display_message(&self) -> String {
        format!("Failed to process query: {}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_message() {
        let err = FetchError::unavailable("mock outage");
        assert_eq!(
            err.display_message(),
            "Failed to process query: query backend is unavailable: mock outage"
        );
    }

    #[test]
    fn test_timeout_formatting() {
        let err = FetchError::timeout(Duration::from_secs(3));
        assert!(err.to_string().contains("3s"));
    }
}
