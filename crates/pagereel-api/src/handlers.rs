//! Request handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use pagereel_models::{GenerationSettings, OptionItem, Scene};
use pagereel_upstream::SubmitTaskRequest;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

const SUBMITTED_MESSAGE: &str =
    "Your video generation request has been submitted and is being processed.";

/// Crawl request body.
#[derive(Deserialize)]
pub struct CrawlRequest {
    #[serde(default)]
    pub url: Option<String>,
}

/// Crawl response: the scenes derived from the landing page.
#[derive(Serialize)]
pub struct CrawlResponse {
    pub success: bool,
    pub scenes: Vec<Scene>,
}

/// Proxy a landing page URL to the extraction service.
pub async fn crawl(
    State(state): State<AppState>,
    Json(body): Json<CrawlRequest>,
) -> ApiResult<Json<CrawlResponse>> {
    let url = body.url.unwrap_or_default();
    if url.trim().is_empty() {
        return Err(ApiError::UrlRequired);
    }

    let scenes = state.crawl.crawl(&url).await.map_err(ApiError::crawl)?;

    Ok(Json(CrawlResponse {
        success: true,
        scenes,
    }))
}

/// Generate request body. Fields are optional so presence is checked
/// the way the route contract defines it: an absent field and an empty
/// string are both "missing", while an empty scene list passes presence
/// and fails the content check. Any present settings object is accepted
/// (missing fields fill from defaults); the video service validates the
/// option ids.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub scenes: Option<Vec<Scene>>,
    #[serde(default)]
    pub settings: Option<GenerationSettings>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub task_name: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    pub success: bool,
    pub task_id: String,
    pub message: String,
}

/// Submit the edited scenes to the video-generation service.
pub async fn generate(
    State(state): State<AppState>,
    Json(body): Json<GenerateRequest>,
) -> ApiResult<Json<GenerateResponse>> {
    let url = body.url.unwrap_or_default();
    let user_id = body.user_id.unwrap_or_default();
    let task_name = body.task_name.unwrap_or_default();

    if url.is_empty()
        || body.scenes.is_none()
        || body.settings.is_none()
        || user_id.is_empty()
        || task_name.is_empty()
    {
        return Err(ApiError::bad_request("Missing required fields"));
    }
    let scenes = body.scenes.unwrap_or_default();
    let settings = body.settings.unwrap_or_default();

    if !scenes.iter().any(Scene::has_script) {
        return Err(ApiError::bad_request(
            "At least one scene must have content",
        ));
    }

    info!(
        url = %url,
        scene_count = scenes.len(),
        user_id = %user_id,
        "Video generation request"
    );

    let request = SubmitTaskRequest::new(&user_id, &task_name, &url, &scenes, &settings);
    let task_id = state
        .video
        .submit(&request)
        .await
        .map_err(ApiError::submit)?;

    Ok(Json(GenerateResponse {
        success: true,
        task_id,
        message: SUBMITTED_MESSAGE.to_string(),
    }))
}

/// Health response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: String,
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now().to_rfc3339(),
    })
}

#[derive(Serialize)]
pub struct ReadyResponse {
    pub status: String,
    pub supabase: bool,
    pub storage: bool,
}

/// Readiness check: the remote store must answer a cheap select and the
/// storage bucket must answer a head request.
pub async fn ready(State(state): State<AppState>) -> (StatusCode, Json<ReadyResponse>) {
    let supabase = state
        .supabase
        .select::<OptionItem>("voice", "id,name", &[], None)
        .await
        .is_ok();
    let storage = state.storage.check_connectivity().await.is_ok();

    let all_ready = supabase && storage;
    let status = if all_ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(ReadyResponse {
            status: if all_ready { "ready" } else { "not ready" }.to_string(),
            supabase,
            storage,
        }),
    )
}
