//! Paged datasets and the client-side cursor over them.

mod cursor;
mod page;
mod resource;

pub use cursor::PaginationCursor;
pub use page::{paginate, total_pages, Page, PageItem, DEFAULT_PAGE_SIZE};
pub use resource::{model_profile_path, FeedMeta, PageResource, ALL_MODELS_PATH, FEED_META_PATH};
