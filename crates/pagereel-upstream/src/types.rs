//! Upstream request/response types.

use pagereel_models::{AssetRef, GenerationSettings, Scene};
use serde::{Deserialize, Serialize};

use crate::error::{UpstreamError, UpstreamResult};

/// Body POSTed to the crawl service.
#[derive(Debug, Clone, Serialize)]
pub struct CrawlRequest {
    pub url: String,
}

/// One extracted record: narration text plus media locations.
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlRecord {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub materials: Vec<String>,
}

/// Reply envelope from the crawl service.
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlReply {
    pub code: i64,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub data: Vec<CrawlRecord>,
}

/// One scene as the video service expects it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenePayload {
    pub id: u32,
    /// Narration script (the editor calls this `content`)
    pub script: String,
    pub assets: Vec<AssetRef>,
}

/// Settings block of the submission payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsPayload {
    pub ratio_id: String,
    pub voice_id: String,
    pub bgm_id: String,
    pub transition_id: String,
    pub enhance_assets: bool,
}

/// Body POSTed to the video-generation service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitTaskRequest {
    pub user_id: String,
    pub task_name: String,
    pub landing_page_url: String,
    pub scenes: Vec<ScenePayload>,
    pub settings: SettingsPayload,
}

impl SubmitTaskRequest {
    /// Build the submission payload from an edited session.
    pub fn new(
        user_id: impl Into<String>,
        task_name: impl Into<String>,
        url: impl Into<String>,
        scenes: &[Scene],
        settings: &GenerationSettings,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            task_name: task_name.into(),
            landing_page_url: url.into(),
            scenes: scenes
                .iter()
                .map(|scene| ScenePayload {
                    id: scene.id,
                    script: scene.content.clone(),
                    assets: scene.assets.clone(),
                })
                .collect(),
            settings: SettingsPayload {
                ratio_id: settings.video_ratio.clone(),
                voice_id: settings.voice.clone(),
                bgm_id: settings.bgm.clone(),
                transition_id: settings.transition.clone(),
                enhance_assets: settings.enhance_assets,
            },
        }
    }

    /// Reject payloads the video service would not accept.
    pub fn validate(&self) -> UpstreamResult<()> {
        if self.user_id.trim().is_empty() {
            return Err(UpstreamError::validation("user_id is required"));
        }
        if self.task_name.trim().is_empty() {
            return Err(UpstreamError::validation("task_name is required"));
        }
        if self.landing_page_url.trim().is_empty() {
            return Err(UpstreamError::validation("landing_page_url is required"));
        }
        // An empty scene list fails the same check as all-blank scripts.
        if !self.scenes.iter().any(|scene| !scene.script.trim().is_empty()) {
            return Err(UpstreamError::validation(
                "At least one scene must have content",
            ));
        }
        Ok(())
    }
}

/// Reply envelope from the video service.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitReply {
    pub code: i64,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub data: Option<SubmitData>,
}

/// Data block of a successful submission reply.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitData {
    pub task_id: String,
}
