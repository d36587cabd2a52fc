use std::sync::Arc;

use anyhow::{Context, Result};
use mg_core::ports::ModelRepositoryPort;
use tracing::info;

/// Removes every model, username, post and media file.
pub struct ClearCatalog {
    models: Arc<dyn ModelRepositoryPort>,
}

impl ClearCatalog {
    pub fn new(models: Arc<dyn ModelRepositoryPort>) -> Self {
        Self { models }
    }

    pub async fn execute(&self) -> Result<()> {
        self.models
            .clear_catalog()
            .await
            .context("Failed to clear catalog")?;
        info!("Catalog cleared");
        Ok(())
    }
}
