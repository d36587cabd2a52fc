use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const ALL_MODELS_PATH: &str = "all-models.json";
pub const FEED_META_PATH: &str = "posts-meta.json";

/// A paged dataset published under the data root.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PageResource {
    /// `posts-page-{n}.json`, every post by creation time descending.
    HomeFeed,
    /// `models-page-{n}.json`, every model by creation time descending.
    ModelsDirectory,
    /// `models/{username}/posts-page-{n}.json`, one model's posts by post count descending.
    ModelPosts { username: String },
}

impl PageResource {
    /// Path of page `page`, relative to the data root.
    pub fn page_path(&self, page: u32) -> String {
        match self {
            PageResource::HomeFeed => format!("posts-page-{page}.json"),
            PageResource::ModelsDirectory => format!("models-page-{page}.json"),
            PageResource::ModelPosts { username } => {
                format!("models/{username}/posts-page-{page}.json")
            }
        }
    }
}

impl fmt::Display for PageResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageResource::HomeFeed => f.write_str("home feed"),
            PageResource::ModelsDirectory => f.write_str("models directory"),
            PageResource::ModelPosts { username } => write!(f, "posts of {username}"),
        }
    }
}

/// `models/{username}.json`
pub fn model_profile_path(username: &str) -> String {
    format!("models/{username}.json")
}

/// Summary of the home feed generation, written next to its pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedMeta {
    pub total_pages: u32,
    pub total_posts: usize,
    pub posts_per_page: usize,
    pub generated_at: DateTime<Utc>,
}
