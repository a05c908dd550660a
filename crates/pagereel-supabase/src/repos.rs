//! Typed repositories over the remote tables.

use metrics::counter;
use tracing::{info, warn};

use pagereel_models::{LikedAsset, OptionCategory, OptionItem, TaskRecord};

use crate::client::SupabaseClient;
use crate::error::SupabaseResult;
use crate::metrics::names as metric_names;

/// Repository for the user's liked-asset library (`assets` table).
#[derive(Clone)]
pub struct LibraryRepository {
    client: SupabaseClient,
}

impl LibraryRepository {
    const TABLE: &'static str = "assets";

    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }

    /// All library rows belonging to one user.
    pub async fn list_for_user(&self, user_id: &str) -> SupabaseResult<Vec<LikedAsset>> {
        let rows: Vec<LikedAsset> = self
            .client
            .select(Self::TABLE, "*", &[("user_id", user_id)], None)
            .await?;

        counter!(
            metric_names::ROWS_LISTED_TOTAL,
            "table" => Self::TABLE
        )
        .increment(rows.len() as u64);

        Ok(rows)
    }

    /// Persist one liked asset.
    pub async fn save(&self, liked: &LikedAsset) -> SupabaseResult<()> {
        self.client
            .insert(Self::TABLE, std::slice::from_ref(liked))
            .await?;
        info!("Saved liked asset for {}: {}", liked.user_id, liked.url);
        Ok(())
    }

    /// Remove a liked asset by its location. Removing an absent row is a
    /// no-op.
    pub async fn remove(&self, user_id: &str, url: &str) -> SupabaseResult<()> {
        self.client
            .delete(Self::TABLE, &[("user_id", user_id), ("url", url)])
            .await
    }
}

/// Repository for the option catalogs (`voice`, `bgm`, `transition`).
#[derive(Clone)]
pub struct OptionsRepository {
    client: SupabaseClient,
}

impl OptionsRepository {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }

    /// Load one category, never failing:
    /// active rows if any, otherwise seed the table and re-read,
    /// otherwise the built-in defaults.
    pub async fn load(&self, category: OptionCategory) -> Vec<OptionItem> {
        match self.load_active(category).await {
            Ok(rows) if !rows.is_empty() => rows,
            Ok(_) => self.seed_and_reload(category).await,
            Err(err) => {
                warn!("Falling back to built-in {} options: {}", category, err);
                category.defaults()
            }
        }
    }

    async fn load_active(&self, category: OptionCategory) -> SupabaseResult<Vec<OptionItem>> {
        self.client
            .select(category.table(), "id,name", &[("status", "1")], None)
            .await
    }

    /// Seed an empty table with the defaults, then re-read it without the
    /// status filter. Any failure along the way yields the defaults.
    async fn seed_and_reload(&self, category: OptionCategory) -> Vec<OptionItem> {
        let defaults = category.defaults();

        if let Err(err) = self.client.upsert(category.table(), &defaults, "id").await {
            warn!("Could not seed {} options: {}", category, err);
            return defaults;
        }

        match self
            .client
            .select::<OptionItem>(category.table(), "id,name", &[], None)
            .await
        {
            Ok(rows) if !rows.is_empty() => {
                info!("Seeded {} options with {} defaults", category, rows.len());
                rows
            }
            Ok(_) => defaults,
            Err(err) => {
                warn!("Re-read of {} options failed: {}", category, err);
                defaults
            }
        }
    }
}

/// Repository for the works listing (`task` table). This backend never
/// writes the table; the video service owns it.
#[derive(Clone)]
pub struct TaskRepository {
    client: SupabaseClient,
}

impl TaskRepository {
    const TABLE: &'static str = "task";

    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }

    /// A user's submitted works, newest first.
    pub async fn list_for_user(&self, user_id: &str) -> SupabaseResult<Vec<TaskRecord>> {
        let rows: Vec<TaskRecord> = self
            .client
            .select(
                Self::TABLE,
                "*",
                &[("user_id", user_id)],
                Some("create_time.desc"),
            )
            .await?;

        counter!(
            metric_names::ROWS_LISTED_TOTAL,
            "table" => Self::TABLE
        )
        .increment(rows.len() as u64);

        Ok(rows)
    }
}

// =============================================================================
// Tests
// =============================================================================
