//! SQLite-backed catalog for use case tests.

use std::sync::Arc;

use mg_core::catalog::{Model, Username};
use mg_core::ids::ModelId;
use mg_core::ports::{ClockPort, ModelRepositoryPort, PostRepositoryPort};
use mg_infra::db::executor::DieselSqliteExecutor;
use mg_infra::db::mappers::{ModelRowMapper, PostRowMapper};
use mg_infra::db::pool::init_db_pool;
use mg_infra::db::repositories::{DieselModelRepository, DieselPostRepository};
use tempfile::TempDir;

pub struct FixedClock(pub i64);

impl ClockPort for FixedClock {
    fn now_ms(&self) -> i64 {
        self.0
    }
}

pub struct TestCatalog {
    _dir: TempDir,
    pub models: Arc<dyn ModelRepositoryPort>,
    pub posts: Arc<dyn PostRepositoryPort>,
}

impl TestCatalog {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let db_path = dir.path().join("test.db");
        let pool = init_db_pool(db_path.to_str().unwrap()).unwrap();
        let executor = DieselSqliteExecutor::new(pool);

        Self {
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
            _dir: dir,
        }
    }

    pub async fn add_model(&self, name: &str, usernames: Vec<Username>, created_at: i64) -> Model {
        let model = Model {
            id: ModelId::new(),
            name: name.to_string(),
            avatar_url: format!("/avatars/{name}.jpg"),
            location: None,
            created_at,
            usernames,
        };
        self.models.insert_model(&model).await.unwrap();
        model
    }
}
