//! Video-generation service HTTP client.

use std::time::Duration;

use chrono::Utc;
use rand::Rng;
use reqwest::Client;
use tracing::{debug, info};

use crate::error::{UpstreamError, UpstreamResult};
use crate::types::{SubmitReply, SubmitTaskRequest};

const DEFAULT_VIDEO_URL: &str = "http://localhost:8088/api/v1/task/submit_task";

const MOCK_ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const MOCK_ID_SUFFIX_LEN: usize = 9;

/// Configuration for the video service client.
#[derive(Debug, Clone)]
pub struct VideoConfig {
    /// Full URL of the submit endpoint
    pub endpoint: String,
    /// Request timeout
    pub timeout: Duration,
    /// Fabricate task ids locally instead of calling the service
    pub mock_mode: bool,
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_VIDEO_URL.to_string(),
            timeout: Duration::from_secs(3),
            mock_mode: false,
        }
    }
}

impl VideoConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            endpoint: std::env::var("VIDEO_SERVICE_URL")
                .unwrap_or_else(|_| DEFAULT_VIDEO_URL.to_string()),
            timeout: Duration::from_secs(
                std::env::var("SUBMIT_TASK_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(3),
            ),
            mock_mode: std::env::var("VIDEO_SERVICE_MODE")
                .map(|mode| mode.trim().eq_ignore_ascii_case("mock"))
                .unwrap_or(false),
        }
    }
}

/// Client for the video-generation service.
pub struct VideoClient {
    http: Client,
    config: VideoConfig,
}

impl VideoClient {
    /// Create a new video service client.
    pub fn new(config: VideoConfig) -> UpstreamResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("pagereel-upstream/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(UpstreamError::Network)?;

        Ok(Self { http, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> UpstreamResult<Self> {
        Self::new(VideoConfig::from_env())
    }

    /// Submit a generation task, returning the service-assigned task id.
    ///
    /// In mock mode the service is not contacted and a fabricated id is
    /// returned after validation.
    pub async fn submit(&self, request: &SubmitTaskRequest) -> UpstreamResult<String> {
        request.validate()?;

        if self.config.mock_mode {
            let task_id = mock_task_id();
            info!(task_id = %task_id, "Video service in mock mode, fabricated task id");
            return Ok(task_id);
        }

        debug!("Submitting generation task to {}", self.config.endpoint);

        let response = self
            .http
            .post(&self.config.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| self.wrap_transport(e))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(UpstreamError::request_failed(format!(
                "Video service returned {}: {}",
                status, body
            )));
        }

        let reply: SubmitReply = response.json().await.map_err(|e| self.wrap_transport(e))?;
        if reply.code != 200 {
            let msg = reply.msg.unwrap_or_else(|| "Remote service error".to_string());
            return Err(UpstreamError::service(reply.code, msg));
        }

        match reply.data {
            Some(data) => Ok(data.task_id),
            None => Err(UpstreamError::invalid_response(
                "submission reply is missing data.task_id",
            )),
        }
    }

    fn wrap_transport(&self, err: reqwest::Error) -> UpstreamError {
        if err.is_timeout() {
            UpstreamError::Timeout(self.config.timeout.as_secs())
        } else {
            UpstreamError::Network(err)
        }
    }
}

/// Fabricated development task id: `task_{unix_millis}_{9 base-36 chars}`.
fn mock_task_id() -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..MOCK_ID_SUFFIX_LEN)
        .map(|_| MOCK_ID_ALPHABET[rng.gen_range(0..MOCK_ID_ALPHABET.len())] as char)
        .collect();
    format!("task_{}_{}", Utc::now().timestamp_millis(), suffix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagereel_models::{AssetRef, GenerationSettings, Scene};
    use serde_json::json;
    use serial_test::serial;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn sample_request() -> SubmitTaskRequest {
        let mut scene = Scene::new(1, "Hello");
        scene.assets.push(AssetRef::from_location("https://x/a.jpg"));
        SubmitTaskRequest::new(
            "user-1",
            "My launch video",
            "https://example.com",
            &[scene],
            &GenerationSettings::default(),
        )
    }

    fn client_for(server: &MockServer) -> VideoClient {
        VideoClient::new(VideoConfig {
            endpoint: format!("{}/api/v1/task/submit_task", server.uri()),
            timeout: Duration::from_secs(3),
            mock_mode: false,
        })
        .unwrap()
    }

    #[test]
    fn test_config_defaults() {
        let config = VideoConfig::default();
        assert_eq!(config.endpoint, "http://localhost:8088/api/v1/task/submit_task");
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert!(!config.mock_mode);
    }

    #[test]
    #[serial]
    fn test_config_from_env_mock_mode() {
        std::env::set_var("VIDEO_SERVICE_MODE", "mock");
        assert!(VideoConfig::from_env().mock_mode);

        std::env::set_var("VIDEO_SERVICE_MODE", "real");
        assert!(!VideoConfig::from_env().mock_mode);

        std::env::remove_var("VIDEO_SERVICE_MODE");
        assert!(!VideoConfig::from_env().mock_mode);
    }

    #[test]
    fn test_mock_task_id_shape() {
        let id = mock_task_id();
        let parts: Vec<&str> = id.split('_').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "task");
        assert!(parts[1].parse::<u64>().is_ok());
        assert_eq!(parts[2].len(), MOCK_ID_SUFFIX_LEN);
        assert!(parts[2]
            .bytes()
            .all(|b| MOCK_ID_ALPHABET.contains(&b)));
    }

    #[tokio::test]
    async fn test_submit_validates_before_network() {
        let client = VideoClient::new(VideoConfig::default()).unwrap();
        let mut request = sample_request();
        request.scenes[0].script = String::new();
        let err = client.submit(&request).await.unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn test_submit_posts_payload_and_returns_task_id() {
        let server = MockServer::start().await;
        let request = sample_request();
        let expected_body = serde_json::to_value(&request).unwrap();
        Mock::given(method("POST"))
            .and(path("/api/v1/task/submit_task"))
            .and(body_json(expected_body))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "code": 200,
                "msg": "success",
                "data": {"task_id": "task_1755750000000_k3j9x2m1q"}
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let task_id = client.submit(&request).await.unwrap();
        assert_eq!(task_id, "task_1755750000000_k3j9x2m1q");
    }

    #[tokio::test]
    async fn test_submit_service_error_carries_msg() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "code": 429,
                "msg": "task quota exceeded"
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client.submit(&sample_request()).await.unwrap_err();
        match err {
            UpstreamError::Service { code, msg } => {
                assert_eq!(code, 429);
                assert_eq!(msg, "task quota exceeded");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_submit_missing_data_is_invalid_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"code": 200, "msg": "ok"})),
            )
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client.submit(&sample_request()).await.unwrap_err();
        assert!(matches!(err, UpstreamError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_mock_mode_skips_network() {
        // Endpoint is unroutable; success proves no request was made.
        let client = VideoClient::new(VideoConfig {
            endpoint: "http://127.0.0.1:1/api/v1/task/submit_task".to_string(),
            timeout: Duration::from_secs(1),
            mock_mode: true,
        })
        .unwrap();

        let task_id = client.submit(&sample_request()).await.unwrap();
        assert!(task_id.starts_with("task_"));
    }
}
