//! Client-side model search over the full model index.

use mg_core::catalog::ModelIndexEntry;
use mg_core::paging::DEFAULT_PAGE_SIZE;
use mg_core::ports::CatalogSourcePort;
use mg_core::search::{SearchOutcome, SearchQuery};
use tracing::{error, info};

/// Most matches offered by the navigation dropdown.
pub const SUGGESTION_LIMIT: usize = 10;

/// The model index, fetched once, filtered per query and revealed in
/// fixed-size slices.
pub struct SearchIndex {
    models: Vec<ModelIndexEntry>,
    query: SearchQuery,
    results: Vec<ModelIndexEntry>,
    visible: usize,
    page_size: usize,
}

impl SearchIndex {
    pub fn new(models: Vec<ModelIndexEntry>) -> Self {
        Self {
            models,
            query: SearchQuery::new(""),
            results: Vec::new(),
            visible: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Fetches `all-models.json`; an unreadable index searches as empty.
    pub async fn load(source: &dyn CatalogSourcePort) -> Self {
        match source.fetch_model_index().await {
            Ok(index) => {
                info!(models = index.models.len(), "Model index loaded");
                Self::new(index.models)
            }
            Err(err) => {
                error!(error = %err, "Model index unavailable, search will find nothing");
                Self::new(Vec::new())
            }
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    fn filter(&self, query: &SearchQuery) -> Vec<ModelIndexEntry> {
        if query.is_blank() || query.is_too_short() {
            return Vec::new();
        }
        self.models
            .iter()
            .filter(|entry| query.matches(&entry.model))
            .cloned()
            .collect()
    }

    /// Replaces the result set and resets to the first slice.
    pub fn search(&mut self, raw: &str) -> SearchOutcome {
        let query = SearchQuery::new(raw);
        self.results = self.filter(&query);
        self.visible = self.page_size.min(self.results.len());
        self.query = query;
        self.outcome()
    }

    pub fn outcome(&self) -> SearchOutcome {
        if self.query.is_blank() {
            SearchOutcome::Idle
        } else if self.query.is_too_short() {
            SearchOutcome::QueryTooShort
        } else if self.results.is_empty() {
            SearchOutcome::NoResults
        } else {
            SearchOutcome::Matches {
                total: self.results.len(),
            }
        }
    }

    pub fn query(&self) -> &SearchQuery {
        &self.query
    }

    pub fn results(&self) -> &[ModelIndexEntry] {
        &self.results
    }

    pub fn visible(&self) -> &[ModelIndexEntry] {
        &self.results[..self.visible]
    }

    pub fn has_more(&self) -> bool {
        self.visible < self.results.len()
    }

    /// Reveals the next slice of already-filtered results. Returns how many
    /// became visible.
    pub fn load_more(&mut self) -> usize {
        let before = self.visible;
        self.visible = (self.visible + self.page_size).min(self.results.len());
        self.visible - before
    }

    /// Dropdown matches for `raw`, same gating and matching as `search`.
    pub fn suggest(&self, raw: &str) -> Vec<&ModelIndexEntry> {
        let query = SearchQuery::new(raw);
        if query.is_blank() || query.is_too_short() {
            return Vec::new();
        }
        self.models
            .iter()
            .filter(|entry| query.matches(&entry.model))
            .take(SUGGESTION_LIMIT)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}
