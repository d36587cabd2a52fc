use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ids::MediaFileId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MediaType {
    Image,
    Video,
    Gif,
}

const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "webm", "m4v", "mkv", "avi"];

impl MediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Image => "IMAGE",
            MediaType::Video => "VIDEO",
            MediaType::Gif => "GIF",
        }
    }

    pub fn is_picture(&self) -> bool {
        matches!(self, MediaType::Image | MediaType::Gif)
    }

    /// Classifies a file by extension: known video containers are VIDEO,
    /// `.gif` is GIF, anything else is treated as IMAGE.
    pub fn from_file_name(file_name: &str) -> Self {
        let ext = file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();

        if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
            MediaType::Video
        } else if ext == "gif" {
            MediaType::Gif
        } else {
            MediaType::Image
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown media type: {0} (expected IMAGE, VIDEO or GIF)")]
pub struct UnknownMediaType(pub String);

impl FromStr for MediaType {
    type Err = UnknownMediaType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "IMAGE" => Ok(MediaType::Image),
            "VIDEO" => Ok(MediaType::Video),
            "GIF" => Ok(MediaType::Gif),
            other => Err(UnknownMediaType(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaFile {
    pub id: MediaFileId,
    pub url: String,
    #[serde(rename = "type")]
    pub media_type: MediaType,
}
