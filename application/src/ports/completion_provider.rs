//! Completion provider port
//!
//! Defines the interface for requesting a single completion from an LLM
//! provider.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during a completion call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Authentication rejected: {0}")]
    Authentication(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Request failed ({status}): {message}")]
    RequestFailed { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timed out after {0:?}")]
    Timeout(Duration),
}

impl ProviderError {
    /// Whether another attempt of the same call may succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            ProviderError::Connection(_)
            | ProviderError::RateLimited(_)
            | ProviderError::Timeout(_) => true,
            ProviderError::RequestFailed { status, .. } => *status >= 500,
            ProviderError::Authentication(_) | ProviderError::InvalidResponse(_) => false,
        }
    }
}

/// Provider of text completions
///
/// This port defines how the application layer talks to an LLM.
/// Implementations (adapters) live in the infrastructure layer. Calls may be
/// issued concurrently, so implementations must be `Send + Sync`.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Send one prompt and return the raw completion text
    async fn complete(&self, prompt: &str) -> Result<String, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_classification() {
        assert!(ProviderError::Connection("reset".into()).is_retryable());
        assert!(ProviderError::RateLimited("slow down".into()).is_retryable());
        assert!(ProviderError::Timeout(Duration::from_secs(1)).is_retryable());
        assert!(
            ProviderError::RequestFailed {
                status: 503,
                message: "unavailable".into()
            }
            .is_retryable()
        );
        assert!(
            !ProviderError::RequestFailed {
                status: 400,
                message: "bad request".into()
            }
            .is_retryable()
        );
        assert!(!ProviderError::Authentication("bad key".into()).is_retryable());
    }

    #[test]
    fn test_display() {
        let error = ProviderError::RequestFailed {
            status: 500,
            message: "boom".into(),
        };
        assert_eq!(error.to_string(), "Request failed (500): boom");
    }
}
