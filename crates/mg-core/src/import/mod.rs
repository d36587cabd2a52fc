//! Directory convention used by bulk import:
//! `/media/{username}/post-{n}/<file>`.

use serde::{Deserialize, Serialize};

use crate::catalog::MediaType;

/// A file found under the media root, addressed by its site-absolute path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScannedFile {
    /// `/` followed by the path relative to the scanned root.
    pub full_path: String,
    pub file_name: String,
    #[serde(rename = "type")]
    pub media_type: MediaType,
    pub size: u64,
}

impl ScannedFile {
    pub fn is_thumbnail(&self) -> bool {
        self.file_name.to_lowercase().contains("thumbnail")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaPathInfo {
    pub username: String,
    pub post_number: u32,
}

/// Extracts the username and post number from a media path. Paths that do
/// not follow the convention yield `None` and are ignored by importers.
pub fn parse_media_path(full_path: &str) -> Option<MediaPathInfo> {
    let rest = full_path.strip_prefix("/media/")?;
    let mut parts = rest.splitn(3, '/');
    let username = parts.next().filter(|u| !u.is_empty())?;
    let post_dir = parts.next()?;
    // the convention requires a file (or deeper path) under the post directory
    parts.next()?;

    let digits = post_dir.strip_prefix("post-")?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let post_number = digits.parse().ok()?;

    Some(MediaPathInfo {
        username: username.to_string(),
        post_number,
    })
}
