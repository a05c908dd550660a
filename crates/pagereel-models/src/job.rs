//! Submitted generation jobs and the remote works listing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{GenerationSettings, Scene};

/// Lifecycle of a submitted job. Owned by the external video service;
/// this backend only ever learns the id at submit time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    #[default]
    Submitted,
    Processing,
    Completed,
    Failed,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Submitted => "submitted",
            JobStatus::Processing => "processing",
            JobStatus::Completed => "completed",
            JobStatus::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }
}

/// A submitted generation request and the snapshot it carried.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    /// Opaque id issued by the video service.
    pub task_id: String,

    pub user_id: String,
    pub task_name: String,

    /// Landing page the scenes were crawled from.
    pub url: String,

    pub scenes: Vec<Scene>,
    pub settings: GenerationSettings,

    #[serde(default)]
    pub status: JobStatus,

    pub submitted_at: DateTime<Utc>,
}

impl Job {
    /// Snapshot a freshly accepted submission.
    pub fn submitted(
        task_id: impl Into<String>,
        user_id: impl Into<String>,
        task_name: impl Into<String>,
        url: impl Into<String>,
        scenes: Vec<Scene>,
        settings: GenerationSettings,
    ) -> Self {
        Self {
            task_id: task_id.into(),
            user_id: user_id.into(),
            task_name: task_name.into(),
            url: url.into(),
            scenes,
            settings,
            status: JobStatus::Submitted,
            submitted_at: Utc::now(),
        }
    }
}

/// Row of the remote `task` table, written by the video service and read
/// back for the profile works listing. Every column beyond `user_id` is
/// optional because the service fills them in as a job progresses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    pub user_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_video_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_time: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_time: Option<DateTime<Utc>>,
}
