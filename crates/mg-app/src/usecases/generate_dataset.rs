use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use mg_core::catalog::{Model, ModelCard, ModelIndex, ModelIndexEntry, PostCard};
use mg_core::ids::ModelId;
use mg_core::paging::{paginate, total_pages, FeedMeta, Page};
use mg_core::ports::{ClockPort, DatasetWriterPort, ModelRepositoryPort, PostRepositoryPort};
use tracing::{info, warn};

#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("reading catalog failed: {0:#}")]
    Catalog(anyhow::Error),

    #[error("writing dataset failed: {0:#}")]
    Write(anyhow::Error),

    #[error("post {post_id} references missing model {model_id}")]
    DanglingPost { post_id: String, model_id: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    pub total_posts: usize,
    pub feed_pages: u32,
    pub models_pages: u32,
    pub profiles: usize,
    /// Models left out of per-model output for lacking a primary username.
    pub skipped_models: Vec<String>,
}

/// Publishes the catalog as the static JSON tree read by listing pages.
pub struct GenerateStaticDataset {
    models: Arc<dyn ModelRepositoryPort>,
    posts: Arc<dyn PostRepositoryPort>,
    writer: Arc<dyn DatasetWriterPort>,
    clock: Arc<dyn ClockPort>,
    posts_per_page: usize,
    models_per_page: usize,
}

impl GenerateStaticDataset {
    pub fn new(
        models: Arc<dyn ModelRepositoryPort>,
        posts: Arc<dyn PostRepositoryPort>,
        writer: Arc<dyn DatasetWriterPort>,
        clock: Arc<dyn ClockPort>,
        posts_per_page: usize,
        models_per_page: usize,
    ) -> Self {
        Self {
            models,
            posts,
            writer,
            clock,
            posts_per_page: posts_per_page.max(1),
            models_per_page: models_per_page.max(1),
        }
    }

    #[tracing::instrument(name = "usecase.generate_dataset.execute", skip(self))]
    pub async fn execute(&self) -> Result<GenerationReport, GenerateError> {
        let models = self.models.list_models().await.map_err(GenerateError::Catalog)?;
        let by_id: HashMap<&ModelId, &Model> = models.iter().map(|m| (&m.id, m)).collect();

        let (total_posts, feed_pages) = self.write_home_feed(&by_id).await?;

        let mut cards = Vec::with_capacity(models.len());
        let mut index = Vec::with_capacity(models.len());
        for model in &models {
            let post_counts = self
                .posts
                .list_post_counts(&model.id)
                .await
                .map_err(GenerateError::Catalog)?;
            cards.push(ModelCard {
                model: model.clone(),
                total_posts: post_counts.len() as u32,
            });
            index.push(ModelIndexEntry {
                model: model.clone(),
                post_counts,
            });
        }

        let models_pages = paginate(&cards, self.models_per_page);
        for page in &models_pages {
            self.writer
                .write_models_page(page)
                .await
                .map_err(GenerateError::Write)?;
        }
        self.writer
            .write_model_index(&ModelIndex::new(index))
            .await
            .map_err(GenerateError::Write)?;

        let mut profiles = 0;
        let mut skipped_models = Vec::new();
        for card in &cards {
            let Some(username) = card.model.primary_username() else {
                warn!(model = %card.model.name, "Skipping model without primary username");
                skipped_models.push(card.model.name.clone());
                continue;
            };
            self.write_model_pages(card, username).await?;
            profiles += 1;
        }

        let report = GenerationReport {
            total_posts,
            feed_pages,
            models_pages: models_pages.len() as u32,
            profiles,
            skipped_models,
        };
        info!(
            total_posts = report.total_posts,
            feed_pages = report.feed_pages,
            profiles = report.profiles,
            "Dataset generated"
        );
        Ok(report)
    }

    async fn write_home_feed(
        &self,
        by_id: &HashMap<&ModelId, &Model>,
    ) -> Result<(usize, u32), GenerateError> {
        let total = self.posts.count_posts().await.map_err(GenerateError::Catalog)?;
        let pages = total_pages(total, self.posts_per_page);

        let generated_at = DateTime::<Utc>::from_timestamp_millis(self.clock.now_ms())
            .unwrap_or_else(Utc::now);
        self.writer
            .write_feed_meta(&FeedMeta {
                total_pages: pages,
                total_posts: total,
                posts_per_page: self.posts_per_page,
                generated_at,
            })
            .await
            .map_err(GenerateError::Write)?;

        for n in 1..=pages {
            let offset = (n as usize - 1) * self.posts_per_page;
            let posts = self
                .posts
                .list_recent_posts(self.posts_per_page, offset)
                .await
                .map_err(GenerateError::Catalog)?;

            let cards = posts
                .into_iter()
                .map(|post| {
                    let model = by_id.get(&post.model_id).ok_or_else(|| {
                        GenerateError::DanglingPost {
                            post_id: post.id.to_string(),
                            model_id: post.model_id.to_string(),
                        }
                    })?;
                    Ok(PostCard {
                        model: (*model).clone(),
                        post,
                    })
                })
                .collect::<Result<Vec<_>, GenerateError>>()?;

            self.writer
                .write_feed_page(&Page::new(cards, n, pages))
                .await
                .map_err(GenerateError::Write)?;
        }

        Ok((total, pages))
    }

    async fn write_model_pages(&self, card: &ModelCard, username: &str) -> Result<(), GenerateError> {
        let model = &card.model;
        self.writer
            .write_model_profile(username, card)
            .await
            .map_err(GenerateError::Write)?;

        let pages = total_pages(card.total_posts as usize, self.posts_per_page);
        for n in 1..=pages {
            let offset = (n as usize - 1) * self.posts_per_page;
            let posts = self
                .posts
                .list_model_posts(&model.id, self.posts_per_page, offset)
                .await
                .map_err(GenerateError::Catalog)?;
            let cards = posts
                .into_iter()
                .map(|post| PostCard {
                    post,
                    model: model.clone(),
                })
                .collect();

            self.writer
                .write_model_posts_page(model, username, &Page::new(cards, n, pages))
                .await
                .map_err(GenerateError::Write)?;
        }
        Ok(())
    }
}
