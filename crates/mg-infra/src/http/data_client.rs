use std::marker::PhantomData;

use anyhow::{Context, Result};
use async_trait::async_trait;
use mg_core::catalog::{ModelCard, ModelIndex};
use mg_core::paging::{model_profile_path, Page, PageItem, PageResource, ALL_MODELS_PATH};
use mg_core::ports::{CatalogSourcePort, PageFetchError, PageSourcePort};
use mg_core::routing::encode_segment;
use reqwest::StatusCode;
use tracing::debug;

use crate::codec::{decode_page, ProfileDocument};

/// Reads the published dataset over HTTP from `{base_url}/data/...`.
#[derive(Debug, Clone)]
pub struct HttpDataClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpDataClient {
    /// No request timeout is configured; a stalled server surfaces as a
    /// transport failure whenever the connection gives up.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .context("build http client failed")?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn page_source<T: PageItem>(&self, resource: PageResource) -> HttpPageSource<T> {
        HttpPageSource {
            client: self.clone(),
            resource,
            _item: PhantomData,
        }
    }

    /// Dataset paths hold raw usernames; each segment is escaped for the URL.
    fn url(&self, relative: &str) -> String {
        let encoded: Vec<String> = relative.split('/').map(encode_segment).collect();
        format!("{}/data/{}", self.base_url, encoded.join("/"))
    }

    async fn get(&self, relative: &str) -> Result<Vec<u8>, PageFetchError> {
        let url = self.url(relative);
        debug!(url = %url, "Fetching data resource");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| PageFetchError::Transport(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(PageFetchError::NotFound(relative.to_string()));
        }
        if !status.is_success() {
            return Err(PageFetchError::Status {
                status: status.as_u16(),
                path: relative.to_string(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| PageFetchError::Transport(e.to_string()))?;
        Ok(body.to_vec())
    }

    async fn get_json<D: serde::de::DeserializeOwned>(
        &self,
        relative: &str,
    ) -> Result<D, PageFetchError> {
        let bytes = self.get(relative).await?;
        serde_json::from_slice(&bytes).map_err(|e| PageFetchError::Malformed {
            path: relative.to_string(),
            reason: e.to_string(),
        })
    }
}

#[async_trait]
impl CatalogSourcePort for HttpDataClient {
    async fn fetch_model_index(&self) -> Result<ModelIndex, PageFetchError> {
        self.get_json(ALL_MODELS_PATH).await
    }

    async fn fetch_model_profile(&self, username: &str) -> Result<ModelCard, PageFetchError> {
        let document: ProfileDocument = self.get_json(&model_profile_path(username)).await?;
        Ok(document.model)
    }
}

/// One paged dataset fetched over HTTP.
pub struct HttpPageSource<T> {
    client: HttpDataClient,
    resource: PageResource,
    _item: PhantomData<fn() -> T>,
}

#[async_trait]
impl<T: PageItem> PageSourcePort<T> for HttpPageSource<T> {
    async fn fetch_page(&self, page: u32) -> Result<Page<T>, PageFetchError> {
        let path = self.resource.page_path(page);
        let bytes = self.client.get(&path).await?;
        decode_page(&path, &bytes)
    }
}
