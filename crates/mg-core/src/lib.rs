//! # mg-core
//!
//! Core domain models and ports for MediaGallery.
//!
//! This crate contains pure domain logic without any infrastructure dependencies.

pub mod catalog;
pub mod config;
pub mod ids;
pub mod import;
pub mod listing;
pub mod paging;
pub mod ports;
pub mod restore;
pub mod routing;
pub mod search;

pub use catalog::{MediaFile, MediaType, Model, ModelCard, ModelIndex, ModelIndexEntry, Post, PostCard, Username};
pub use config::AppConfig;
pub use ids::{MediaFileId, ModelId, PostId, UsernameId};
pub use listing::{ListingPhase, ScrollPosition};
pub use paging::{Page, PageItem, PageResource, PaginationCursor};
pub use restore::RestorationSnapshot;
pub use routing::Route;
pub use search::{SearchOutcome, SearchQuery};
