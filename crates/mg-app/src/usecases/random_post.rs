use std::sync::Arc;

use mg_core::ports::CatalogSourcePort;
use mg_core::routing::Route;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::warn;

/// Picks a random post route from the model index.
pub struct RandomPost {
    catalog: Arc<dyn CatalogSourcePort>,
}

impl RandomPost {
    pub fn new(catalog: Arc<dyn CatalogSourcePort>) -> Self {
        Self { catalog }
    }

    /// Chooses uniformly among models with a primary username and at least
    /// one post, then uniformly among that model's post numbers.
    pub async fn execute<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Route> {
        let index = match self.catalog.fetch_model_index().await {
            Ok(index) => index,
            Err(err) => {
                warn!(error = %err, "Model index unavailable for random post");
                return None;
            }
        };

        let candidates: Vec<_> = index
            .models
            .iter()
            .filter(|entry| !entry.post_counts.is_empty())
            .filter_map(|entry| {
                entry
                    .model
                    .primary_username()
                    .map(|username| (username, &entry.post_counts))
            })
            .collect();

        let (username, post_counts) = candidates.choose(rng)?;
        let post_count = post_counts.choose(rng)?;

        Some(Route::Post {
            username: username.to_string(),
            post_count: *post_count,
        })
    }
}
