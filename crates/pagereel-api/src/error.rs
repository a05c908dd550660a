//! API error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use pagereel_upstream::UpstreamError;

pub type ApiResult<T> = Result<T, ApiError>;

/// Errors surfaced by the API routes.
///
/// Two body shapes exist on the wire: the crawl route's input check
/// renders a bare `{"error": ...}`, everything else renders
/// `{"success": false, "error": ...}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("URL is required")]
    UrlRequired,

    #[error("{0}")]
    BadRequest(String),

    /// The external service rejected the request (reply `code != 200`).
    #[error("{0}")]
    Rejected(String),

    /// The external service could not be reached or replied malformed.
    #[error("{0}")]
    Unavailable(String),
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }

    /// Crawl-route mapping: any upstream failure is a 500.
    pub fn crawl(err: UpstreamError) -> Self {
        match err {
            UpstreamError::Validation(_) => ApiError::UrlRequired,
            other => ApiError::Unavailable(upstream_message(other)),
        }
    }

    /// Generate-route mapping: service rejections are 400s, transport
    /// failures and timeouts 500s.
    pub fn submit(err: UpstreamError) -> Self {
        match err {
            UpstreamError::Validation(msg) => ApiError::BadRequest(msg),
            UpstreamError::Service { msg, .. } => ApiError::Rejected(msg),
            UpstreamError::InvalidResponse(_) => {
                ApiError::Rejected("Remote service error".to_string())
            }
            other => ApiError::Unavailable(upstream_message(other)),
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::UrlRequired | ApiError::BadRequest(_) | ApiError::Rejected(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Unavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Bare human-readable message of an upstream error, without the
/// variant prefix `Display` adds.
fn upstream_message(err: UpstreamError) -> String {
    match err {
        UpstreamError::Validation(msg)
        | UpstreamError::RequestFailed(msg)
        | UpstreamError::InvalidResponse(msg) => msg,
        UpstreamError::Service { msg, .. } => msg,
        other => other.to_string(),
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            ApiError::UrlRequired => json!({ "error": self.to_string() }),
            _ => json!({ "success": false, "error": self.to_string() }),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn render(err: ApiError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_url_required_has_bare_error_body() {
        let (status, body) = render(ApiError::UrlRequired).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "URL is required"}));
    }

    #[tokio::test]
    async fn test_bad_request_has_success_false_body() {
        let (status, body) = render(ApiError::bad_request("Missing required fields")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({"success": false, "error": "Missing required fields"})
        );
    }

    #[tokio::test]
    async fn test_crawl_mapping_is_500_with_service_msg() {
        let err = ApiError::crawl(UpstreamError::service(500, "Failed to crawl URL"));
        let (status, body) = render(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            json!({"success": false, "error": "Failed to crawl URL"})
        );
    }

    #[tokio::test]
    async fn test_submit_mapping_splits_rejection_from_transport() {
        let rejected = ApiError::submit(UpstreamError::service(429, "task quota exceeded"));
        let (status, body) = render(rejected).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "task quota exceeded");

        let timed_out = ApiError::submit(UpstreamError::Timeout(3));
        let (status, body) = render(timed_out).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Request timeout after 3 seconds");
    }

    #[tokio::test]
    async fn test_submit_malformed_reply_is_remote_service_error() {
        let err = ApiError::submit(UpstreamError::invalid_response("missing data.task_id"));
        let (status, body) = render(err).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Remote service error");
    }
}
