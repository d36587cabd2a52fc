//! MediaGallery Application Layer
//!
//! Listing lifecycle (first render, incremental fetch, scroll restoration),
//! client-side model search, and the admin use cases over the catalog.

pub mod listing;
pub mod search;
pub mod usecases;

pub use listing::{
    IncrementalFetcher, InitialPageData, ListingSession, LoadMoreOutcome, PageDataLoader,
    ScrollRestorer, ScrollSubscription,
};
pub use search::SearchIndex;
