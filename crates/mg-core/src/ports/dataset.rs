use std::path::Path;

use anyhow::Result;
use async_trait::async_trait;

use crate::catalog::{Model, ModelCard, ModelIndex, PostCard};
use crate::import::ScannedFile;
use crate::paging::{FeedMeta, Page};

/// Sink for the published JSON dataset.
#[async_trait]
pub trait DatasetWriterPort: Send + Sync {
    async fn write_feed_meta(&self, meta: &FeedMeta) -> Result<()>;

    async fn write_feed_page(&self, page: &Page<PostCard>) -> Result<()>;

    async fn write_models_page(&self, page: &Page<ModelCard>) -> Result<()>;

    async fn write_model_profile(&self, username: &str, card: &ModelCard) -> Result<()>;

    async fn write_model_posts_page(
        &self,
        model: &Model,
        username: &str,
        page: &Page<PostCard>,
    ) -> Result<()>;

    async fn write_model_index(&self, index: &ModelIndex) -> Result<()>;
}

/// Enumerates media files below a root directory.
#[async_trait]
pub trait MediaScannerPort: Send + Sync {
    async fn scan(&self, root: &Path) -> Result<Vec<ScannedFile>>;
}
