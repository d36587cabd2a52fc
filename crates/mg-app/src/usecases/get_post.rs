use std::sync::Arc;

use mg_core::catalog::PostCard;
use mg_core::ports::{ModelRepositoryPort, PostRepositoryPort};

#[derive(Debug, thiserror::Error)]
pub enum GetPostError {
    #[error("no model with primary username '{0}'")]
    ModelNotFound(String),

    #[error("post {post_count} of '{username}' not found")]
    PostNotFound { username: String, post_count: u32 },

    #[error(transparent)]
    Repository(#[from] anyhow::Error),
}

/// Resolves `/{username}/post/{postCount}` to the post, its media and model.
pub struct GetPost {
    models: Arc<dyn ModelRepositoryPort>,
    posts: Arc<dyn PostRepositoryPort>,
}

impl GetPost {
    pub fn new(models: Arc<dyn ModelRepositoryPort>, posts: Arc<dyn PostRepositoryPort>) -> Self {
        Self { models, posts }
    }

    pub async fn execute(&self, username: &str, post_count: u32) -> Result<PostCard, GetPostError> {
        let model = self
            .models
            .find_by_primary_username(username)
            .await?
            .ok_or_else(|| GetPostError::ModelNotFound(username.to_string()))?;

        let post = self
            .posts
            .find_by_post_count(&model.id, post_count)
            .await?
            .ok_or_else(|| GetPostError::PostNotFound {
                username: username.to_string(),
                post_count,
            })?;

        Ok(PostCard { post, model })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::create_post::{CreatePost, NewMediaItem, NewPost};
    use crate::usecases::test_support::{FixedClock, TestCatalog};
    use mg_core::catalog::{MediaType, Username};

    #[tokio::test]
    async fn finds_post_by_primary_username_and_number() {
        let catalog = TestCatalog::new();
        let alice = catalog
            .add_model("Alice", vec![Username::primary("alice"), Username::alias("ally")], 1)
            .await;
        CreatePost::new(catalog.models.clone(), catalog.posts.clone(), Arc::new(FixedClock(3)))
            .execute(NewPost {
                model_id: alice.id.clone(),
                title: None,
                thumbnail_url: "/t.jpg".to_string(),
                media: vec![NewMediaItem {
                    url: "/a.gif".to_string(),
                    media_type: MediaType::Gif,
                }],
            })
            .await
            .unwrap();
        let uc = GetPost::new(catalog.models.clone(), catalog.posts.clone());

        let card = uc.execute("alice", 1).await.unwrap();
        assert_eq!(card.model.id, alice.id);
        assert_eq!(card.post.media[0].media_type, MediaType::Gif);

        assert!(matches!(
            uc.execute("alice", 2).await,
            Err(GetPostError::PostNotFound { post_count: 2, .. })
        ));
        assert!(matches!(
            uc.execute("ally", 1).await,
            Err(GetPostError::ModelNotFound(_))
        ));
    }
}
