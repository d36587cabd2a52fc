//! In-memory page sources for listing tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use mg_core::paging::{paginate, Page, PageItem};
use mg_core::ports::{PageFetchError, PageSourcePort};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub n: u32,
}

impl PageItem for Item {
    const COLLECTION: &'static str = "items";
}

pub fn numbered_pages(count: u32, per_page: usize) -> Vec<Page<Item>> {
    let items: Vec<Item> = (1..=count).map(|n| Item { n }).collect();
    paginate(&items, per_page)
}

/// Serves prebuilt pages, optionally failing or misnumbering one page and
/// delaying every response.
pub struct StaticPageSource {
    pages: Vec<Page<Item>>,
    fail_on: Option<u32>,
    misnumber: Option<(u32, u32)>,
    delay: Option<Duration>,
    calls: AtomicUsize,
    requested: Mutex<Vec<u32>>,
}

impl StaticPageSource {
    pub fn new(pages: Vec<Page<Item>>) -> Self {
        Self {
            pages,
            fail_on: None,
            misnumber: None,
            delay: None,
            calls: AtomicUsize::new(0),
            requested: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_on(mut self, page: u32) -> Self {
        self.fail_on = Some(page);
        self
    }

    /// Answer a request for `page` with the page numbered `served`.
    pub fn misnumbered(mut self, page: u32, served: u32) -> Self {
        self.misnumber = Some((page, served));
        self
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requested(&self) -> Vec<u32> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageSourcePort<Item> for StaticPageSource {
    async fn fetch_page(&self, page: u32) -> Result<Page<Item>, PageFetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requested.lock().unwrap().push(page);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_on == Some(page) {
            return Err(PageFetchError::Status {
                status: 500,
                path: format!("items-page-{page}.json"),
            });
        }

        let served = match self.misnumber {
            Some((requested, served)) if requested == page => served,
            _ => page,
        };
        self.pages
            .iter()
            .find(|p| p.page == served)
            .cloned()
            .ok_or_else(|| PageFetchError::NotFound(format!("items-page-{page}.json")))
    }
}
