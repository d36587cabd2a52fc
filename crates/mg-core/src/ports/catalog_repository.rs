use anyhow::Result;
use async_trait::async_trait;

use crate::catalog::{Model, Post};
use crate::ids::ModelId;

/// Persistence of models and their handles.
#[async_trait]
pub trait ModelRepositoryPort: Send + Sync {
    /// Inserts the model and all of its usernames atomically.
    async fn insert_model(&self, model: &Model) -> Result<()>;

    async fn get_model(&self, model_id: &ModelId) -> Result<Option<Model>>;

    async fn find_by_primary_username(&self, username: &str) -> Result<Option<Model>>;

    /// Returns the stored usernames equal (case-insensitively) to any candidate.
    async fn find_existing_usernames(&self, candidates: &[String]) -> Result<Vec<String>>;

    /// All models, newest first.
    async fn list_models(&self) -> Result<Vec<Model>>;

    /// Removes media files, posts, usernames and models in one transaction.
    async fn clear_catalog(&self) -> Result<()>;
}

/// Persistence of posts and their media.
#[async_trait]
pub trait PostRepositoryPort: Send + Sync {
    /// Inserts the post and its media atomically.
    async fn insert_post(&self, post: &Post) -> Result<()>;

    async fn count_posts(&self) -> Result<usize>;

    async fn count_posts_for_model(&self, model_id: &ModelId) -> Result<usize>;

    /// Post numbers already used by a model, highest first.
    async fn list_post_counts(&self, model_id: &ModelId) -> Result<Vec<u32>>;

    async fn find_by_post_count(&self, model_id: &ModelId, post_count: u32)
        -> Result<Option<Post>>;

    /// Posts of every model, newest first.
    async fn list_recent_posts(&self, limit: usize, offset: usize) -> Result<Vec<Post>>;

    /// One model's posts, highest post number first.
    async fn list_model_posts(
        &self,
        model_id: &ModelId,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<Post>>;
}
