use async_trait::async_trait;

use super::PageFetchError;
use crate::catalog::{ModelCard, ModelIndex};
use crate::paging::{Page, PageItem};

/// Read access to one paged dataset (home feed, models directory, or one
/// model's posts). Bound to its dataset at construction.
#[async_trait]
pub trait PageSourcePort<T: PageItem>: Send + Sync {
    /// Fetch 1-based page `page`.
    async fn fetch_page(&self, page: u32) -> Result<Page<T>, PageFetchError>;
}

/// Read access to the non-paged catalog files.
#[async_trait]
pub trait CatalogSourcePort: Send + Sync {
    /// The full denormalized model list (`all-models.json`).
    async fn fetch_model_index(&self) -> Result<ModelIndex, PageFetchError>;

    /// Profile header of one model (`models/{username}.json`).
    async fn fetch_model_profile(&self, username: &str) -> Result<ModelCard, PageFetchError>;
}
