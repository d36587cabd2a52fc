use std::sync::Arc;

use mg_core::catalog::{MediaFile, MediaType, Post};
use mg_core::ids::{MediaFileId, ModelId, PostId};
use mg_core::ports::{ClockPort, ModelRepositoryPort, PostRepositoryPort};
use serde::Deserialize;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewMediaItem {
    pub url: String,
    #[serde(rename = "type")]
    pub media_type: MediaType,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
    pub model_id: ModelId,
    #[serde(default)]
    pub title: Option<String>,
    pub thumbnail_url: String,
    pub media: Vec<NewMediaItem>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedPost {
    pub post: Post,
    /// Primary username of the owner, for the post's canonical route.
    pub username: String,
}

#[derive(Debug, thiserror::Error)]
pub enum CreatePostError {
    #[error("thumbnail URL is required")]
    MissingThumbnail,

    #[error("media list must not be empty")]
    NoMedia,

    #[error("model not found: {0}")]
    ModelNotFound(ModelId),

    #[error("model {0} has no primary username")]
    NoPrimaryUsername(String),

    #[error("media item {0} has no URL")]
    MediaWithoutUrl(usize),

    #[error(transparent)]
    Repository(#[from] anyhow::Error),
}

/// Appends a post to a model, numbered after the model's existing posts.
pub struct CreatePost {
    models: Arc<dyn ModelRepositoryPort>,
    posts: Arc<dyn PostRepositoryPort>,
    clock: Arc<dyn ClockPort>,
}

impl CreatePost {
    pub fn new(
        models: Arc<dyn ModelRepositoryPort>,
        posts: Arc<dyn PostRepositoryPort>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            models,
            posts,
            clock,
        }
    }

    #[tracing::instrument(name = "usecase.create_post.execute", skip(self, input), fields(model_id = %input.model_id))]
    pub async fn execute(&self, input: NewPost) -> Result<CreatedPost, CreatePostError> {
        let thumbnail_url = input.thumbnail_url.trim();
        if thumbnail_url.is_empty() {
            return Err(CreatePostError::MissingThumbnail);
        }
        if input.media.is_empty() {
            return Err(CreatePostError::NoMedia);
        }

        let model = self
            .models
            .get_model(&input.model_id)
            .await?
            .ok_or_else(|| CreatePostError::ModelNotFound(input.model_id.clone()))?;
        let username = model
            .primary_username()
            .ok_or_else(|| CreatePostError::NoPrimaryUsername(model.name.clone()))?
            .to_string();

        if let Some(index) = input.media.iter().position(|m| m.url.trim().is_empty()) {
            return Err(CreatePostError::MediaWithoutUrl(index));
        }

        let post_count = self.posts.count_posts_for_model(&model.id).await? as u32 + 1;
        let now = self.clock.now_ms();
        let title = input
            .title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("Post {post_count}"));

        let post = Post {
            id: PostId::new(),
            model_id: model.id.clone(),
            title,
            thumbnail_url: thumbnail_url.to_string(),
            post_count,
            published_at: now,
            created_at: now,
            media: input
                .media
                .into_iter()
                .map(|m| MediaFile {
                    id: MediaFileId::new(),
                    url: m.url.trim().to_string(),
                    media_type: m.media_type,
                })
                .collect(),
        };
        self.posts.insert_post(&post).await?;

        info!(username = %username, post_count, media = post.media.len(), "Created post");
        Ok(CreatedPost { post, username })
    }
}
