//! Object key layout and public URL construction.

use chrono::Utc;
use pagereel_models::AssetKind;

/// Key for a fresh upload: `{images|videos|gifs}/{unix_millis}-{filename}`.
pub fn object_key(kind: AssetKind, filename: &str) -> String {
    object_key_at(kind, filename, Utc::now().timestamp_millis())
}

/// Key for an upload at a fixed timestamp.
pub fn object_key_at(kind: AssetKind, filename: &str, millis: i64) -> String {
    format!("{}/{}-{}", kind.storage_prefix(), millis, filename)
}

/// Public URL of an object in a bucket.
pub fn public_url(bucket: &str, region: &str, key: &str) -> String {
    format!("https://{}.cos.{}.myqcloud.com/{}", bucket, region, key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_key_layout() {
        assert_eq!(
            object_key_at(AssetKind::Image, "hero.png", 1700000000000),
            "images/1700000000000-hero.png"
        );
        assert_eq!(
            object_key_at(AssetKind::Video, "clip.mp4", 1700000000000),
            "videos/1700000000000-clip.mp4"
        );
        assert_eq!(
            object_key_at(AssetKind::Gif, "anim.gif", 1700000000000),
            "gifs/1700000000000-anim.gif"
        );
    }

    #[test]
    fn test_object_key_uses_current_millis() {
        let key = object_key(AssetKind::Image, "a.jpg");
        let rest = key.strip_prefix("images/").unwrap();
        let (millis, name) = rest.split_once('-').unwrap();
        assert!(millis.parse::<i64>().is_ok());
        assert_eq!(name, "a.jpg");
    }

    #[test]
    fn test_public_url() {
        assert_eq!(
            public_url("reels", "ap-guangzhou", "images/1-a.jpg"),
            "https://reels.cos.ap-guangzhou.myqcloud.com/images/1-a.jpg"
        );
    }
}
