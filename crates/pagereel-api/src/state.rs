//! Application state.

use std::sync::Arc;

use pagereel_storage::CosClient;
use pagereel_supabase::SupabaseClient;
use pagereel_upstream::{CrawlClient, CrawlConfig, VideoClient, VideoConfig};

use crate::config::ApiConfig;

/// Shared application state. All clients are constructed once at
/// startup and handed to handlers through here.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub supabase: Arc<SupabaseClient>,
    pub storage: Arc<CosClient>,
    pub crawl: Arc<CrawlClient>,
    pub video: Arc<VideoClient>,
}

impl AppState {
    /// Create new application state from environment configuration.
    pub async fn new(config: ApiConfig) -> anyhow::Result<Self> {
        let supabase = SupabaseClient::from_env()?;
        let storage = CosClient::from_env().await?;
        let crawl = CrawlClient::new(CrawlConfig::from_env())?;
        let video = VideoClient::new(VideoConfig::from_env())?;

        Ok(Self {
            config,
            supabase: Arc::new(supabase),
            storage: Arc::new(storage),
            crawl: Arc::new(crawl),
            video: Arc::new(video),
        })
    }
}
