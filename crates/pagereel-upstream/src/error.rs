//! Upstream client error types.

use thiserror::Error;

/// Result type for upstream service calls.
pub type UpstreamResult<T> = Result<T, UpstreamError>;

/// Errors from the crawl and video-generation clients.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Service error ({code}): {msg}")]
    Service { code: i64, msg: String },

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Request timeout after {0} seconds")]
    Timeout(u64),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl UpstreamError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn service(code: i64, msg: impl Into<String>) -> Self {
        Self::Service {
            code,
            msg: msg.into(),
        }
    }

    pub fn request_failed(msg: impl Into<String>) -> Self {
        Self::RequestFailed(msg.into())
    }

    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::InvalidResponse(msg.into())
    }

    /// True when the remote call timed out rather than failed outright.
    pub fn is_timeout(&self) -> bool {
        matches!(self, UpstreamError::Timeout(_))
    }

    /// True for rejected input, as opposed to an upstream failure.
    pub fn is_validation(&self) -> bool {
        matches!(self, UpstreamError::Validation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_is_distinguishable() {
        let err = UpstreamError::Timeout(60);
        assert!(err.is_timeout());
        assert_eq!(err.to_string(), "Request timeout after 60 seconds");
    }

    #[test]
    fn test_service_error_carries_code_and_msg() {
        let err = UpstreamError::service(500, "task queue full");
        assert!(!err.is_timeout());
        assert_eq!(err.to_string(), "Service error (500): task queue full");
    }
}
