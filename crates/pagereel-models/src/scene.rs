//! Scenes: the script/asset units of one editing session.

use serde::{Deserialize, Serialize};

use crate::AssetRef;

/// One narration unit derived from a crawled page.
///
/// Ids are positive and unique within a session, assigned 1..N in crawl
/// order. The script text is user-editable; the asset list grows and
/// shrinks through uploads, library picks, and deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scene {
    pub id: u32,

    /// Narration script. Wire name stays `content`; the external job
    /// payload renames it to `script`.
    pub content: String,

    #[serde(default)]
    pub assets: Vec<AssetRef>,
}

impl Scene {
    pub fn new(id: u32, content: impl Into<String>) -> Self {
        Self {
            id,
            content: content.into(),
            assets: Vec::new(),
        }
    }

    /// The single empty scene shown before any crawl.
    pub fn seed_list() -> Vec<Scene> {
        vec![Scene::new(1, "")]
    }

    /// True when the script has any non-whitespace text.
    pub fn has_script(&self) -> bool {
        !self.content.trim().is_empty()
    }
}
