//! Generation settings chosen in the editing panel.

use serde::{Deserialize, Serialize};

/// Aspect ratio choices offered by the editor, as (id, label).
pub const RATIO_CHOICES: &[(&str, &str)] = &[("1", "16:9"), ("2", "9:16"), ("3", "1:1")];

/// Settings attached to one generation submission.
///
/// The string fields hold option ids from the voice/bgm/transition
/// catalogs; an empty id means "not chosen yet" and is seeded from the
/// first loaded option of its category. A partial wire object fills the
/// missing fields from the defaults; the video service validates the
/// ids it is given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerationSettings {
    pub video_ratio: String,
    pub voice: String,
    pub bgm: String,
    pub transition: String,
    pub enhance_assets: bool,
}

impl Default for GenerationSettings {
    /// 9:16 portrait, no asset enhancement.
    fn default() -> Self {
        Self {
            video_ratio: "2".to_string(),
            voice: String::new(),
            bgm: String::new(),
            transition: String::new(),
            enhance_assets: false,
        }
    }
}
