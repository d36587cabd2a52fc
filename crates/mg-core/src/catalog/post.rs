use serde::{Deserialize, Serialize};

use super::{MediaFile, Model};
use crate::ids::{ModelId, PostId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: PostId,
    pub model_id: ModelId,
    pub title: String,
    pub thumbnail_url: String,
    /// Per-model sequence number, used in `/{username}/post/{postCount}`.
    pub post_count: u32,
    pub published_at: i64,
    pub created_at: i64,
    pub media: Vec<MediaFile>,
}

impl Post {
    /// Images and GIFs both count as pictures on a card.
    pub fn image_count(&self) -> usize {
        self.media.iter().filter(|m| m.media_type.is_picture()).count()
    }

    pub fn video_count(&self) -> usize {
        self.media.len() - self.image_count()
    }

    /// URLs of the first `max` pictures, for the combined thumbnail.
    pub fn preview_urls(&self, max: usize) -> Vec<&str> {
        self.media
            .iter()
            .filter(|m| m.media_type.is_picture())
            .take(max)
            .map(|m| m.url.as_str())
            .collect()
    }
}

/// A post together with its owning model, as served in feed pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostCard {
    #[serde(flatten)]
    pub post: Post,
    pub model: Model,
}

impl PostCard {
    pub fn id(&self) -> &PostId {
        &self.post.id
    }
}
