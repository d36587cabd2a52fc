//! Catalog use cases: admin writes, dataset publication and lookups.

pub mod bulk_import;
pub mod clear_catalog;
pub mod create_model;
pub mod create_post;
pub mod generate_dataset;
pub mod get_post;
pub mod random_post;

#[cfg(test)]
pub(crate) mod test_support;

pub use bulk_import::{BulkImport, BulkImportError, ImportReport, ScanSummary};
pub use clear_catalog::ClearCatalog;
pub use create_model::{CreateModel, CreateModelError, NewModel, UsernameInput};
pub use create_post::{CreatePost, CreatePostError, CreatedPost, NewMediaItem, NewPost};
pub use generate_dataset::{GenerateError, GenerateStaticDataset, GenerationReport};
pub use get_post::{GetPost, GetPostError};
pub use random_post::RandomPost;
