//! Listing pages: first render, fetch-on-scroll and back-navigation
//! restoration.

mod fetcher;
mod loader;
mod restorer;
mod session;

#[cfg(test)]
pub(crate) mod test_support;

pub use fetcher::{IncrementalFetcher, LoadMoreOutcome, SkipReason};
pub use loader::{load_profile_header, InitialPageData, PageDataLoader};
pub use restorer::ScrollRestorer;
pub use session::{ListingSession, ScrollSubscription, RESTORE_PAINT_DELAY};
