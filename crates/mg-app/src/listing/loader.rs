use std::sync::Arc;

use mg_core::catalog::ModelCard;
use mg_core::paging::PageItem;
use mg_core::ports::{CatalogSourcePort, PageSourcePort};
use tracing::{error, warn};

/// Items available for first render of a listing.
#[derive(Debug, Clone, PartialEq)]
pub struct InitialPageData<T> {
    pub items: Vec<T>,
    pub total_pages: u32,
    /// Last page already included in `items`.
    pub start_page: u32,
}

impl<T> InitialPageData<T> {
    /// Rendered when the dataset could not be read.
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total_pages: 0,
            start_page: 1,
        }
    }
}

/// Reads the leading page(s) of a dataset for first render. Never fails:
/// any read error yields [`InitialPageData::empty`].
pub struct PageDataLoader<T: PageItem> {
    source: Arc<dyn PageSourcePort<T>>,
}

impl<T: PageItem> PageDataLoader<T> {
    pub fn new(source: Arc<dyn PageSourcePort<T>>) -> Self {
        Self { source }
    }

    pub async fn load_first(&self) -> InitialPageData<T> {
        match self.source.fetch_page(1).await {
            Ok(page) => InitialPageData {
                items: page.items,
                total_pages: page.total_pages,
                start_page: 1,
            },
            Err(err) => {
                error!(error = %err, "Initial page load failed, rendering empty listing");
                InitialPageData::empty()
            }
        }
    }

    /// Concatenates pages `1..=page` so a deep link opens with every earlier
    /// item present and the cursor at `page`.
    pub async fn load_through(&self, page: u32) -> InitialPageData<T> {
        if page <= 1 {
            return self.load_first().await;
        }

        let mut items = Vec::new();
        let mut total_pages = 0;
        for n in 1..=page {
            match self.source.fetch_page(n).await {
                Ok(fetched) => {
                    total_pages = fetched.total_pages;
                    items.extend(fetched.items);
                }
                Err(err) => {
                    error!(error = %err, page = n, target_page = page, "Deep page load failed, rendering empty listing");
                    return InitialPageData::empty();
                }
            }
        }

        InitialPageData {
            items,
            total_pages,
            start_page: page,
        }
    }
}

/// Header card for a model profile page; `None` when it cannot be read.
pub async fn load_profile_header(
    catalog: &dyn CatalogSourcePort,
    username: &str,
) -> Option<ModelCard> {
    match catalog.fetch_model_profile(username).await {
        Ok(card) => Some(card),
        Err(err) => {
            warn!(error = %err, username, "Model profile unavailable");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::test_support::{numbered_pages, StaticPageSource};

    #[tokio::test]
    async fn first_page_of_25_items() {
        let source = Arc::new(StaticPageSource::new(numbered_pages(25, 10)));
        let loader = PageDataLoader::new(source);

        let data = loader.load_first().await;

        assert_eq!(data.items.len(), 10);
        assert_eq!(data.total_pages, 3);
        assert_eq!(data.start_page, 1);
    }

    #[tokio::test]
    async fn failure_renders_empty() {
        let source = Arc::new(StaticPageSource::new(numbered_pages(25, 10)).failing_on(1));
        let data = PageDataLoader::new(source).load_first().await;

        assert_eq!(data, InitialPageData::empty());
    }

    #[tokio::test]
    async fn load_through_concatenates_in_order() {
        let source = Arc::new(StaticPageSource::new(numbered_pages(25, 10)));
        let data = PageDataLoader::new(source).load_through(2).await;

        let ids: Vec<u32> = data.items.iter().map(|i| i.n).collect();
        assert_eq!(ids, (1..=20).collect::<Vec<_>>());
        assert_eq!(data.start_page, 2);
        assert_eq!(data.total_pages, 3);
    }

    #[tokio::test]
    async fn load_through_past_the_end_is_empty() {
        let source = Arc::new(StaticPageSource::new(numbered_pages(25, 10)));
        let data = PageDataLoader::new(source).load_through(4).await;

        assert!(data.items.is_empty());
        assert_eq!(data.total_pages, 0);
    }
}
