use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::catalog::{ModelCard, PostCard};

/// Items per page for every producer-side dataset and for client-side search.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// One fixed-size batch of items at a 1-based position in a larger ordered
/// sequence. Ordering is fixed by the producer and never re-sorted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub total_pages: u32,
    pub has_more: bool,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, page: u32, total_pages: u32) -> Self {
        Self {
            items,
            page,
            total_pages,
            has_more: page < total_pages,
        }
    }

    /// Pages are 1-indexed and `has_more` must equal `page < total_pages`.
    pub fn is_consistent(&self) -> bool {
        self.page >= 1 && self.has_more == (self.page < self.total_pages)
    }
}

/// Number of pages needed for `total_items`; zero items means zero pages.
pub fn total_pages(total_items: usize, per_page: usize) -> u32 {
    if per_page == 0 {
        return 0;
    }
    total_items.div_ceil(per_page) as u32
}

/// Splits an already ordered list into consecutive pages.
pub fn paginate<T: Clone>(items: &[T], per_page: usize) -> Vec<Page<T>> {
    let total = total_pages(items.len(), per_page);
    if total == 0 {
        return Vec::new();
    }
    items
        .chunks(per_page)
        .enumerate()
        .map(|(idx, chunk)| Page::new(chunk.to_vec(), idx as u32 + 1, total))
        .collect()
}

/// Item types that can travel inside a page resource. `COLLECTION` is the
/// JSON key holding the item array (`posts`, `models`).
pub trait PageItem: Clone + Send + Sync + Serialize + DeserializeOwned + 'static {
    const COLLECTION: &'static str;
}

impl PageItem for PostCard {
    const COLLECTION: &'static str = "posts";
}

impl PageItem for ModelCard {
    const COLLECTION: &'static str = "models";
}
