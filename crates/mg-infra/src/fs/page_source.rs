use std::io::ErrorKind;
use std::marker::PhantomData;
use std::path::PathBuf;

use async_trait::async_trait;
use mg_core::catalog::{ModelCard, ModelIndex};
use mg_core::paging::{model_profile_path, Page, PageItem, PageResource, ALL_MODELS_PATH};
use mg_core::ports::{CatalogSourcePort, PageFetchError, PageSourcePort};

use crate::codec::{decode_page, ProfileDocument};

/// Generated dataset read straight from disk, as used for first render.
#[derive(Debug, Clone)]
pub struct FsDataset {
    root: PathBuf,
}

impl FsDataset {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn page_source<T: PageItem>(&self, resource: PageResource) -> FsPageSource<T> {
        FsPageSource {
            dataset: self.clone(),
            resource,
            _item: PhantomData,
        }
    }

    async fn read(&self, relative: &str) -> Result<Vec<u8>, PageFetchError> {
        tokio::fs::read(self.root.join(relative))
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => PageFetchError::NotFound(relative.to_string()),
                _ => PageFetchError::Io(format!("{relative}: {e}")),
            })
    }

    async fn read_json<D: serde::de::DeserializeOwned>(
        &self,
        relative: &str,
    ) -> Result<D, PageFetchError> {
        let bytes = self.read(relative).await?;
        serde_json::from_slice(&bytes).map_err(|e| PageFetchError::Malformed {
            path: relative.to_string(),
            reason: e.to_string(),
        })
    }
}

#[async_trait]
impl CatalogSourcePort for FsDataset {
    async fn fetch_model_index(&self) -> Result<ModelIndex, PageFetchError> {
        self.read_json(ALL_MODELS_PATH).await
    }

    async fn fetch_model_profile(&self, username: &str) -> Result<ModelCard, PageFetchError> {
        let document: ProfileDocument = self.read_json(&model_profile_path(username)).await?;
        Ok(document.model)
    }
}

pub struct FsPageSource<T> {
    dataset: FsDataset,
    resource: PageResource,
    _item: PhantomData<fn() -> T>,
}

#[async_trait]
impl<T: PageItem> PageSourcePort<T> for FsPageSource<T> {
    async fn fetch_page(&self, page: u32) -> Result<Page<T>, PageFetchError> {
        let path = self.resource.page_path(page);
        let bytes = self.dataset.read(&path).await?;
        decode_page(&path, &bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mg_core::catalog::PostCard;

    #[tokio::test]
    async fn missing_page_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let source = FsDataset::new(dir.path()).page_source::<PostCard>(PageResource::HomeFeed);

        let err = source.fetch_page(1).await.unwrap_err();

        assert!(matches!(err, PageFetchError::NotFound(path) if path == "posts-page-1.json"));
    }

    #[tokio::test]
    async fn garbage_index_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(ALL_MODELS_PATH), b"not json").unwrap();

        let err = FsDataset::new(dir.path())
            .fetch_model_index()
            .await
            .unwrap_err();

        assert!(matches!(err, PageFetchError::Malformed { .. }));
    }
}
