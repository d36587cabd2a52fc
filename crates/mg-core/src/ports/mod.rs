//! Port interfaces for the application layer
//!
//! Ports define the contract between the use cases and infrastructure
//! implementations, keeping the domain independent of storage, HTTP and
//! the rendering surface.

mod catalog_repository;
mod clock;
mod dataset;
mod errors;
mod page_source;
mod snapshot_store;
mod viewport;

pub use catalog_repository::{ModelRepositoryPort, PostRepositoryPort};
pub use clock::ClockPort;
pub use dataset::{DatasetWriterPort, MediaScannerPort};
pub use errors::{PageFetchError, SnapshotStoreError};
pub use page_source::{CatalogSourcePort, PageSourcePort};
pub use snapshot_store::SnapshotStorePort;
pub use viewport::ViewportPort;
