use serde::{Deserialize, Serialize};

use crate::ids::ModelId;

/// A handle under which a model is published. Exactly one handle per model
/// is primary and is used to build the model's canonical URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Username {
    pub username: String,
    pub is_primary: bool,
}

impl Username {
    pub fn primary(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            is_primary: true,
        }
    }

    pub fn alias(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            is_primary: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Model {
    pub id: ModelId,
    pub name: String,
    pub avatar_url: String,
    pub location: Option<String>,
    pub created_at: i64,
    pub usernames: Vec<Username>,
}

impl Model {
    pub fn primary_username(&self) -> Option<&str> {
        self.usernames
            .iter()
            .find(|u| u.is_primary)
            .map(|u| u.username.as_str())
    }

    pub fn handles(&self) -> impl Iterator<Item = &str> {
        self.usernames.iter().map(|u| u.username.as_str())
    }

    /// Handles joined the way listing cards show them: `alice / alice2`.
    pub fn display_handles(&self) -> String {
        self.handles().collect::<Vec<_>>().join(" / ")
    }
}

/// Model as shown in the models directory and on the profile header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelCard {
    #[serde(flatten)]
    pub model: Model,
    pub total_posts: u32,
}

/// Denormalized model record used by search and random navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelIndexEntry {
    #[serde(flatten)]
    pub model: Model,
    pub post_counts: Vec<u32>,
}

/// Full model list, fetched once by clients.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelIndex {
    pub models: Vec<ModelIndexEntry>,
    pub total: usize,
}

impl ModelIndex {
    pub fn new(models: Vec<ModelIndexEntry>) -> Self {
        let total = models.len();
        Self { models, total }
    }
}
