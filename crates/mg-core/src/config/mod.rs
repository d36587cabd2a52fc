//! # Pure Data Module - Data Transfer Objects Only
//!
//! Defines the configuration structure and its TOML/env mapping. Layering
//! and defaults are applied by the loader in the binary; this module holds
//! no policy and no validation.

use std::path::PathBuf;

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AppConfig {
    pub storage: StorageConfig,
    pub dataset: DatasetConfig,
    pub server: ServerConfig,
    pub client: ClientConfig,
    pub paging: PagingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StorageConfig {
    /// SQLite database file (path info only, no existence check)
    pub database_path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DatasetConfig {
    /// Root of the generated JSON tree, served under `/data`
    pub data_dir: PathBuf,
    /// Directory containing `media/`, scanned by bulk import
    pub media_root: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerConfig {
    pub bind_addr: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientConfig {
    /// Origin that serves `/data/...`
    pub base_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PagingConfig {
    pub posts_per_page: usize,
    pub models_per_page: usize,
}
