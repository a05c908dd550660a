//! Asset references and media kind classification.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use url::Url;

/// Media kind of an asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    /// Still image (jpg, jpeg, png)
    Image,
    /// Video or audio clip (mp4, wav)
    Video,
    /// Animated gif
    Gif,
}

impl AssetKind {
    pub const ALL: &'static [AssetKind] = &[AssetKind::Image, AssetKind::Video, AssetKind::Gif];

    /// Classify from a filename suffix ("jpg", "MP4", ...).
    /// Comparison is case-insensitive; unknown suffixes fall back to Image.
    pub fn from_suffix(suffix: &str) -> Self {
        match suffix.to_ascii_lowercase().as_str() {
            "gif" => AssetKind::Gif,
            "jpg" | "jpeg" | "png" => AssetKind::Image,
            "mp4" | "wav" => AssetKind::Video,
            _ => AssetKind::Image,
        }
    }

    /// Classify from a MIME type ("image/png", "video/mp4", ...).
    /// Unknown types fall back to Image.
    pub fn from_mime(mime: &str) -> Self {
        if mime.starts_with("image/gif") {
            AssetKind::Gif
        } else if mime.starts_with("image/") {
            AssetKind::Image
        } else if mime.starts_with("video/") {
            AssetKind::Video
        } else {
            AssetKind::Image
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AssetKind::Image => "image",
            AssetKind::Video => "video",
            AssetKind::Gif => "gif",
        }
    }

    /// Object key prefix for uploads of this kind.
    pub fn storage_prefix(&self) -> &'static str {
        match self {
            AssetKind::Image => "images",
            AssetKind::Video => "videos",
            AssetKind::Gif => "gifs",
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AssetKind {
    type Err = KindParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "image" => Ok(AssetKind::Image),
            "video" => Ok(AssetKind::Video),
            "gif" => Ok(AssetKind::Gif),
            _ => Err(KindParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Error)]
#[error("Unknown asset kind: {0}")]
pub struct KindParseError(String);

/// Reference to one media file by public location.
///
/// Wire shape is `{"type", "suffix", "url"}`; `uploading` marks an
/// in-flight upload placeholder and is serialized only when set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetRef {
    #[serde(rename = "type")]
    pub kind: AssetKind,

    /// Filename suffix without the dot, possibly empty.
    pub suffix: String,

    /// Public URL of the media.
    pub url: String,

    #[serde(default, skip_serializing_if = "is_false")]
    pub uploading: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl AssetRef {
    pub fn new(kind: AssetKind, suffix: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            kind,
            suffix: suffix.into(),
            url: url.into(),
            uploading: false,
        }
    }

    /// Build a reference from a public location, deriving suffix and kind
    /// from the trailing filename segment.
    pub fn from_location(url: impl Into<String>) -> Self {
        let url = url.into();
        let suffix = location_suffix(&url);
        Self {
            kind: AssetKind::from_suffix(&suffix),
            suffix,
            url,
            uploading: false,
        }
    }

    /// Placeholder shown in an asset list while an upload is in flight.
    /// `marker` stands in for the url until the real one is known.
    pub fn pending(kind: AssetKind, suffix: impl Into<String>, marker: impl Into<String>) -> Self {
        Self {
            kind,
            suffix: suffix.into(),
            url: marker.into(),
            uploading: true,
        }
    }

    /// Local identity used by the liked set, `{kind}-{url}`.
    pub fn local_key(&self) -> String {
        format!("{}-{}", self.kind, self.url)
    }
}

/// Suffix of a bare filename: the text after the final `.`, case
/// preserved, empty when there is no dot.
pub fn file_suffix(filename: &str) -> String {
    match filename.rfind('.') {
        Some(idx) => filename[idx + 1..].to_string(),
        None => String::new(),
    }
}

/// Trailing filename segment of a URL or path, query and fragment
/// excluded.
pub fn url_filename(location: &str) -> String {
    match Url::parse(location) {
        Ok(parsed) => parsed
            .path_segments()
            .and_then(|segments| segments.last())
            .unwrap_or_default()
            .to_string(),
        Err(_) => {
            let tail = location.rsplit('/').next().unwrap_or(location);
            tail.split(['?', '#']).next().unwrap_or_default().to_string()
        }
    }
}

/// Suffix of a location's trailing filename segment.
pub fn location_suffix(location: &str) -> String {
    file_suffix(&url_filename(location))
}
