pub mod dataset_writer;
pub mod media_scanner;
pub mod page_source;

pub use dataset_writer::JsonDatasetWriter;
pub use media_scanner::FsMediaScanner;
pub use page_source::{FsDataset, FsPageSource};
