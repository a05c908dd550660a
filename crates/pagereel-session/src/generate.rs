//! The generate-view editing session.
//!
//! One session owns the scenes, settings, liked set, and running log of a
//! single editing flow: crawl a landing page, edit the resulting scenes,
//! then submit a generation job. Remote state (the liked-asset library,
//! submitted jobs) lives behind the injected clients.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{error, info, warn};

use pagereel_models::{
    file_suffix, AssetKind, AssetRef, GenerationSettings, Job, LikedAsset, OptionCategory,
    OptionItem, Scene,
};
use pagereel_storage::{CosClient, StorageError};
use pagereel_supabase::{AuthUser, LibraryRepository, OptionsRepository};
use pagereel_upstream::{CrawlClient, SubmitTaskRequest, VideoClient};

use crate::error::{SessionError, SessionResult};

/// Clients a session drives. Constructed once at startup and shared.
#[derive(Clone)]
pub struct SessionDeps {
    pub crawl: Arc<CrawlClient>,
    pub video: Arc<VideoClient>,
    pub storage: Arc<CosClient>,
    pub library: Arc<LibraryRepository>,
    pub options: Arc<OptionsRepository>,
}

/// User-visible step of the generate view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStep {
    /// Only the URL input and the Crawl action are available.
    Idle,
    /// Entered on successful crawl; scenes and settings are editable.
    Editing,
    /// At least one job has been submitted. Editing stays open and
    /// further submissions are independent.
    Submitting,
}

/// Option lists backing the settings panel.
#[derive(Debug, Clone, Default)]
pub struct OptionLists {
    pub voice: Vec<OptionItem>,
    pub bgm: Vec<OptionItem>,
    pub transition: Vec<OptionItem>,
}

/// Receipt for a staged upload, redeemed with
/// [`GenerateSession::finish_upload`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadTicket {
    scene_id: u32,
    marker: String,
}

/// State machine behind the generate page.
///
/// All operations take `&mut self`: one session is one logical thread of
/// execution, so no locking is involved. Remote failures never tear the
/// session down; they surface as errors and log lines.
pub struct GenerateSession {
    deps: SessionDeps,
    user: Option<AuthUser>,
    step: SessionStep,
    url: String,
    scenes: Vec<Scene>,
    settings: GenerationSettings,
    options: OptionLists,
    liked: HashSet<String>,
    logs: Vec<String>,
    next_marker: u64,
}

impl GenerateSession {
    pub fn new(deps: SessionDeps, user: Option<AuthUser>) -> Self {
        Self {
            deps,
            user,
            step: SessionStep::Idle,
            url: String::new(),
            scenes: Scene::seed_list(),
            settings: GenerationSettings::default(),
            options: OptionLists::default(),
            liked: HashSet::new(),
            logs: Vec::new(),
            next_marker: 0,
        }
    }

    pub fn step(&self) -> SessionStep {
        self.step
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn scenes(&self) -> &[Scene] {
        &self.scenes
    }

    pub fn settings(&self) -> &GenerationSettings {
        &self.settings
    }

    /// The settings panel binds straight onto the settings value.
    pub fn settings_mut(&mut self) -> &mut GenerationSettings {
        &mut self.settings
    }

    pub fn options(&self) -> &OptionLists {
        &self.options
    }

    pub fn logs(&self) -> &[String] {
        &self.logs
    }

    pub fn user(&self) -> Option<&AuthUser> {
        self.user.as_ref()
    }

    /// Whether an asset is in the local liked set.
    pub fn is_liked(&self, asset: &AssetRef) -> bool {
        self.liked.contains(&asset.local_key())
    }

    /// Crawl a landing page and replace the scene list with the result.
    ///
    /// Requires a signed-in user. A blank url resets the log to a single
    /// error line. Any crawl failure collapses the crawl-success gate:
    /// the session drops back to Idle, the error is appended to the log,
    /// and nothing is retried.
    pub async fn crawl(&mut self, url: &str) -> SessionResult<()> {
        if self.user.is_none() {
            return Err(SessionError::AuthRequired);
        }

        if url.trim().is_empty() {
            self.logs = vec!["Error: Please enter a valid URL".to_string()];
            return Err(SessionError::validation("Please enter a valid URL"));
        }

        self.logs = vec!["Crawling landing page content...".to_string()];
        self.url = url.to_string();

        match self.deps.crawl.crawl(url).await {
            Ok(scenes) => {
                self.logs.push("Crawl successful".to_string());
                self.logs.push("Generating scene content...".to_string());
                self.scenes = scenes;
                self.step = SessionStep::Editing;
                Ok(())
            }
            Err(err) => {
                warn!("Crawl failed: {}", err);
                self.logs.push(format!("Error: {}", err));
                self.step = SessionStep::Idle;
                Err(err.into())
            }
        }
    }

    /// Replace a scene's script. Unknown ids are ignored.
    pub fn update_script(&mut self, scene_id: u32, content: impl Into<String>) {
        let content = content.into();
        if let Some(scene) = self.scene_mut(scene_id) {
            scene.content = content;
        }
    }

    /// Insert an uploading placeholder at the end of the scene's asset
    /// list and hand back the ticket that finds it again.
    pub fn stage_upload(
        &mut self,
        scene_id: u32,
        filename: &str,
        mime: &str,
    ) -> SessionResult<UploadTicket> {
        let kind = AssetKind::from_mime(mime);
        let suffix = file_suffix(filename);

        self.next_marker += 1;
        let marker = format!("pending://{}", self.next_marker);

        let scene = self
            .scene_mut(scene_id)
            .ok_or_else(|| SessionError::validation(format!("Unknown scene: {}", scene_id)))?;
        scene
            .assets
            .push(AssetRef::pending(kind, suffix, marker.clone()));

        Ok(UploadTicket { scene_id, marker })
    }

    /// Resolve a staged upload: replace the placeholder in place on
    /// success, or drop it and log on failure.
    pub fn finish_upload(
        &mut self,
        ticket: UploadTicket,
        outcome: Result<String, StorageError>,
    ) -> SessionResult<AssetRef> {
        match outcome {
            Ok(url) => {
                let (scene_idx, position) = self.locate_placeholder(&ticket).ok_or_else(|| {
                    SessionError::validation("Upload placeholder no longer exists")
                })?;
                let placeholder = &self.scenes[scene_idx].assets[position];
                let asset = AssetRef::new(placeholder.kind, placeholder.suffix.clone(), url);
                self.scenes[scene_idx].assets[position] = asset.clone();
                Ok(asset)
            }
            Err(err) => {
                if let Some((scene_idx, position)) = self.locate_placeholder(&ticket) {
                    self.scenes[scene_idx].assets.remove(position);
                }
                error!("Upload failed: {}", err);
                self.logs.push(format!("Error: {}", err));
                Err(err.into())
            }
        }
    }

    /// Upload a file's bytes to storage and attach the result to a scene.
    /// The scene shows a busy placeholder while the upload runs.
    pub async fn upload_asset(
        &mut self,
        scene_id: u32,
        filename: &str,
        mime: &str,
        data: Vec<u8>,
    ) -> SessionResult<AssetRef> {
        let ticket = self.stage_upload(scene_id, filename, mime)?;
        let key = CosClient::object_key(AssetKind::from_mime(mime), filename);

        let outcome = self.deps.storage.upload_bytes(data, &key, mime).await;
        self.finish_upload(ticket, outcome)
    }

    /// Rows for the "choose from library" dialog.
    pub async fn library_assets(&self) -> SessionResult<Vec<LikedAsset>> {
        match &self.user {
            Some(user) => Ok(self.deps.library.list_for_user(&user.id).await?),
            None => Err(SessionError::AuthRequired),
        }
    }

    /// Attach a stored library row to a scene.
    pub fn add_library_asset(&mut self, scene_id: u32, liked: &LikedAsset) -> SessionResult<()> {
        let asset = liked.to_asset_ref();
        let scene = self
            .scene_mut(scene_id)
            .ok_or_else(|| SessionError::validation(format!("Unknown scene: {}", scene_id)))?;
        scene.assets.push(asset);
        Ok(())
    }

    /// Remove a scene asset by position. Unknown scenes and out-of-range
    /// positions are ignored.
    pub fn delete_asset(&mut self, scene_id: u32, position: usize) {
        if let Some(scene) = self.scene_mut(scene_id) {
            if position < scene.assets.len() {
                scene.assets.remove(position);
            }
        }
    }

    /// Like or unlike an asset.
    ///
    /// The local liked set flips first and flips back if the remote write
    /// fails, so the view never shows a like that did not persist.
    /// Returns whether the asset is liked after the toggle.
    pub async fn toggle_like(&mut self, asset: &AssetRef) -> SessionResult<bool> {
        let user_id = match &self.user {
            Some(user) => user.id.clone(),
            None => return Err(SessionError::AuthRequired),
        };

        let key = asset.local_key();

        if self.liked.contains(&key) {
            self.liked.remove(&key);
            if let Err(err) = self.deps.library.remove(&user_id, &asset.url).await {
                error!("Removing liked asset failed: {}", err);
                self.liked.insert(key);
                return Err(err.into());
            }
            Ok(false)
        } else {
            self.liked.insert(key.clone());
            let liked = LikedAsset::from_asset(user_id, asset);
            if let Err(err) = self.deps.library.save(&liked).await {
                error!("Saving liked asset failed: {}", err);
                self.liked.remove(&key);
                return Err(err.into());
            }
            Ok(true)
        }
    }

    /// Populate the liked set from the remote library. Skipped when no
    /// user is signed in; read failures leave the set as it was.
    pub async fn load_liked(&mut self) {
        let Some(user) = &self.user else {
            return;
        };

        match self.deps.library.list_for_user(&user.id).await {
            Ok(rows) => {
                self.liked = rows.iter().map(|row| row.local_key()).collect();
            }
            Err(err) => {
                error!("Loading liked assets failed: {}", err);
            }
        }
    }

    /// Load the three option catalogs. The first row of each category
    /// seeds the matching settings id when one has not been chosen yet.
    pub async fn load_options(&mut self) {
        let voice = self.deps.options.load(OptionCategory::Voice).await;
        let bgm = self.deps.options.load(OptionCategory::Bgm).await;
        let transition = self.deps.options.load(OptionCategory::Transition).await;

        if self.settings.voice.is_empty() {
            if let Some(first) = voice.first() {
                self.settings.voice = first.id.clone();
            }
        }
        if self.settings.bgm.is_empty() {
            if let Some(first) = bgm.first() {
                self.settings.bgm = first.id.clone();
            }
        }
        if self.settings.transition.is_empty() {
            if let Some(first) = transition.first() {
                self.settings.transition = first.id.clone();
            }
        }

        self.options = OptionLists {
            voice,
            bgm,
            transition,
        };
    }

    /// Submit the edited scenes as a generation job.
    ///
    /// Validation failures produce no job id. On success the id is
    /// appended to the log and the step moves to Submitting; editing
    /// stays open and repeated submissions are independent.
    pub async fn submit(&mut self, task_name: &str) -> SessionResult<Job> {
        let user_id = match &self.user {
            Some(user) => user.id.clone(),
            None => return Err(SessionError::AuthRequired),
        };

        let request =
            SubmitTaskRequest::new(&user_id, task_name, &self.url, &self.scenes, &self.settings);

        self.logs
            .push("Submitting video generation task...".to_string());

        match self.deps.video.submit(&request).await {
            Ok(task_id) => {
                info!(task_id = %task_id, "Generation task submitted");
                self.logs.push(format!("Task submitted: {}", task_id));
                self.step = SessionStep::Submitting;
                Ok(Job::submitted(
                    task_id,
                    user_id,
                    task_name,
                    self.url.clone(),
                    self.scenes.clone(),
                    self.settings.clone(),
                ))
            }
            Err(err) => {
                warn!("Submission failed: {}", err);
                self.logs.push(format!("Error: {}", err));
                Err(err.into())
            }
        }
    }

    fn scene_mut(&mut self, scene_id: u32) -> Option<&mut Scene> {
        self.scenes.iter_mut().find(|scene| scene.id == scene_id)
    }

    fn locate_placeholder(&self, ticket: &UploadTicket) -> Option<(usize, usize)> {
        let scene_idx = self
            .scenes
            .iter()
            .position(|scene| scene.id == ticket.scene_id)?;
        let position = self.scenes[scene_idx]
            .assets
            .iter()
            .position(|asset| asset.uploading && asset.url == ticket.marker)?;
        Some((scene_idx, position))
    }
}
