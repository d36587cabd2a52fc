//! Model search: query normalization, gating and matching.

use crate::catalog::Model;

/// Queries shorter than this (after trimming) never filter.
pub const MIN_QUERY_LEN: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    raw: String,
    normalized: String,
}

impl SearchQuery {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let normalized = raw.trim().to_lowercase();
        Self { raw, normalized }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    pub fn is_blank(&self) -> bool {
        self.normalized.is_empty()
    }

    pub fn is_too_short(&self) -> bool {
        !self.is_blank() && self.normalized.chars().count() < MIN_QUERY_LEN
    }

    /// Case-insensitive substring match on the display name or any handle.
    pub fn matches(&self, model: &Model) -> bool {
        let needle = self.normalized.as_str();
        model.name.to_lowercase().contains(needle)
            || model.handles().any(|h| h.to_lowercase().contains(needle))
    }
}

/// What a search surface should show for the current query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Blank query: nothing to show, nothing to report.
    Idle,
    /// Below the minimum length: prompt for more input.
    QueryTooShort,
    NoResults,
    Matches { total: usize },
}
