//! Liked assets: the user's remembered media library.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{fingerprint, location_suffix, AssetKind, AssetRef};

/// Row of the remote `assets` table.
///
/// `md5` holds the rolling-hash fingerprint of the url; the column name
/// is historical, no real MD5 is involved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikedAsset {
    pub user_id: String,

    #[serde(rename = "type")]
    pub kind: AssetKind,

    pub suffix: String,
    pub url: String,
    pub md5: String,

    /// Set by the store on insert; absent on outgoing rows.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_time: Option<DateTime<Utc>>,
}

impl LikedAsset {
    /// Build the row persisted when a user likes an asset.
    pub fn from_asset(user_id: impl Into<String>, asset: &AssetRef) -> Self {
        Self {
            user_id: user_id.into(),
            kind: asset.kind,
            suffix: asset.suffix.clone(),
            url: asset.url.clone(),
            md5: fingerprint(&asset.url),
            create_time: None,
        }
    }

    /// Local identity used by the liked set, `{kind}-{url}`.
    pub fn local_key(&self) -> String {
        format!("{}-{}", self.kind, self.url)
    }

    /// A scene asset pointing at this library row. The suffix is
    /// re-derived from the url rather than trusted from the row.
    pub fn to_asset_ref(&self) -> AssetRef {
        AssetRef::new(self.kind, location_suffix(&self.url), self.url.clone())
    }
}
