//! Dependency wiring: builds the adapters named by [`AppConfig`] and hands
//! them out as port trait objects.

use std::path::Path;
use std::sync::Arc;

use mg_core::config::AppConfig;
use mg_core::ports::{ClockPort, ModelRepositoryPort, PostRepositoryPort};
use mg_infra::db::executor::DieselSqliteExecutor;
use mg_infra::db::mappers::{ModelRowMapper, PostRowMapper};
use mg_infra::db::pool::{init_db_pool, DbPool};
use mg_infra::db::repositories::{DieselModelRepository, DieselPostRepository};
use mg_infra::http::HttpDataClient;
use mg_infra::SystemClock;
use tracing::info;

pub type WiringResult<T> = Result<T, WiringError>;

#[derive(Debug, thiserror::Error)]
pub enum WiringError {
    #[error("Database initialization failed: {0}")]
    DatabaseInit(String),

    #[error("HTTP client initialization failed: {0}")]
    HttpClientInit(String),
}

/// Catalog repositories for the admin commands.
#[derive(Clone)]
pub struct CatalogDeps {
    pub models: Arc<dyn ModelRepositoryPort>,
    pub posts: Arc<dyn PostRepositoryPort>,
    pub clock: Arc<dyn ClockPort>,
}

fn create_db_pool(db_path: &Path) -> WiringResult<DbPool> {
    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            WiringError::DatabaseInit(format!("Failed to create DB directory: {}", e))
        })?;
    }

    let db_url = db_path
        .to_str()
        .ok_or_else(|| WiringError::DatabaseInit("Invalid database path".to_string()))?;

    init_db_pool(db_url)
        .map_err(|e| WiringError::DatabaseInit(format!("Failed to initialize DB: {:#}", e)))
}

pub fn wire_catalog(config: &AppConfig) -> WiringResult<CatalogDeps> {
    let pool = create_db_pool(&config.storage.database_path)?;
    let executor = DieselSqliteExecutor::new(pool);
    info!(path = %config.storage.database_path.display(), "Catalog database ready");

    Ok(CatalogDeps {
        models: Arc::new(DieselModelRepository::new(
            executor.clone(),
            ModelRowMapper,
            ModelRowMapper,
        )),
        posts: Arc::new(DieselPostRepository::new(
            executor,
            PostRowMapper,
            PostRowMapper,
        )),
        clock: Arc::new(SystemClock),
    })
}

/// HTTP source for the `/data` tree served at `client.base_url`.
pub fn wire_data_client(config: &AppConfig) -> WiringResult<Arc<HttpDataClient>> {
    let client = HttpDataClient::new(config.client.base_url.clone())
        .map_err(|e| WiringError::HttpClientInit(format!("{:#}", e)))?;
    Ok(Arc::new(client))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mg_core::config::{
        ClientConfig, DatasetConfig, PagingConfig, ServerConfig, StorageConfig,
    };
    use tempfile::TempDir;

    fn config_with_db(database_path: std::path::PathBuf) -> AppConfig {
        AppConfig {
            storage: StorageConfig { database_path },
            dataset: DatasetConfig {
                data_dir: "public/data".into(),
                media_root: "public".into(),
            },
            server: ServerConfig {
                bind_addr: "127.0.0.1:3000".to_string(),
            },
            client: ClientConfig {
                base_url: "http://127.0.0.1:3000".to_string(),
            },
            paging: PagingConfig {
                posts_per_page: 10,
                models_per_page: 10,
            },
        }
    }

    #[tokio::test]
    async fn wires_catalog_in_nested_directory() {
        let dir = TempDir::new().unwrap();
        let db_path = dir.path().join("nested").join("gallery.db");

        let deps = wire_catalog(&config_with_db(db_path.clone())).unwrap();

        assert!(db_path.exists());
        assert!(deps.models.list_models().await.unwrap().is_empty());
        assert_eq!(deps.posts.count_posts().await.unwrap(), 0);
    }
}
