use std::collections::HashSet;
use std::sync::Arc;

use mg_core::catalog::{Model, Username};
use mg_core::ids::ModelId;
use mg_core::ports::{ClockPort, ModelRepositoryPort};
use serde::Deserialize;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsernameInput {
    pub username: String,
    #[serde(default)]
    pub is_primary: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewModel {
    pub name: String,
    pub avatar_url: String,
    #[serde(default)]
    pub location: Option<String>,
    pub usernames: Vec<UsernameInput>,
}

#[derive(Debug, thiserror::Error)]
pub enum CreateModelError {
    #[error("model name is required")]
    MissingName,

    #[error("avatar URL is required")]
    MissingAvatar,

    #[error("at least one username is required")]
    NoUsernames,

    #[error("at least one non-blank username is required")]
    NoValidUsernames,

    #[error("a primary username is required")]
    MissingPrimary,

    #[error("only one primary username is allowed, got {0}")]
    MultiplePrimaries(usize),

    #[error("duplicate username in request: {0}")]
    DuplicateUsername(String),

    #[error("username already exists: {}", .0.join(", "))]
    UsernameTaken(Vec<String>),

    #[error(transparent)]
    Repository(#[from] anyhow::Error),
}

/// Registers a model together with its handles.
pub struct CreateModel {
    models: Arc<dyn ModelRepositoryPort>,
    clock: Arc<dyn ClockPort>,
}

impl CreateModel {
    pub fn new(models: Arc<dyn ModelRepositoryPort>, clock: Arc<dyn ClockPort>) -> Self {
        Self { models, clock }
    }

    /// Validates in order: name, avatar, username presence, primary count,
    /// in-request duplicates (trimmed, case-insensitive), then conflicts with
    /// stored usernames. Blank username entries are dropped.
    #[tracing::instrument(name = "usecase.create_model.execute", skip(self, input), fields(name = %input.name))]
    pub async fn execute(&self, input: NewModel) -> Result<Model, CreateModelError> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(CreateModelError::MissingName);
        }
        let avatar_url = input.avatar_url.trim();
        if avatar_url.is_empty() {
            return Err(CreateModelError::MissingAvatar);
        }
        if input.usernames.is_empty() {
            return Err(CreateModelError::NoUsernames);
        }

        let usernames: Vec<Username> = input
            .usernames
            .iter()
            .filter(|u| !u.username.trim().is_empty())
            .map(|u| Username {
                username: u.username.trim().to_string(),
                is_primary: u.is_primary,
            })
            .collect();
        if usernames.is_empty() {
            return Err(CreateModelError::NoValidUsernames);
        }

        match usernames.iter().filter(|u| u.is_primary).count() {
            0 => return Err(CreateModelError::MissingPrimary),
            1 => {}
            n => return Err(CreateModelError::MultiplePrimaries(n)),
        }

        let mut seen = HashSet::new();
        for u in &usernames {
            if !seen.insert(u.username.to_lowercase()) {
                return Err(CreateModelError::DuplicateUsername(u.username.clone()));
            }
        }

        let candidates: Vec<String> = usernames.iter().map(|u| u.username.clone()).collect();
        let taken = self.models.find_existing_usernames(&candidates).await?;
        if !taken.is_empty() {
            return Err(CreateModelError::UsernameTaken(taken));
        }

        let model = Model {
            id: ModelId::new(),
            name: name.to_string(),
            avatar_url: avatar_url.to_string(),
            location: input
                .location
                .as_deref()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(str::to_string),
            created_at: self.clock.now_ms(),
            usernames,
        };
        self.models.insert_model(&model).await?;

        info!(
            model_id = %model.id,
            usernames = model.usernames.len(),
            "Created model"
        );
        Ok(model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::test_support::{FixedClock, TestCatalog};

    fn handle(username: &str, is_primary: bool) -> UsernameInput {
        UsernameInput {
            username: username.to_string(),
            is_primary,
        }
    }

    fn request(usernames: Vec<UsernameInput>) -> NewModel {
        NewModel {
            name: "  Alice  ".to_string(),
            avatar_url: " /avatars/alice.jpg ".to_string(),
            location: Some("   ".to_string()),
            usernames,
        }
    }

    fn use_case(catalog: &TestCatalog) -> CreateModel {
        CreateModel::new(catalog.models.clone(), Arc::new(FixedClock(42)))
    }

    #[tokio::test]
    async fn creates_trimmed_model() {
        let catalog = TestCatalog::new();
        let model = use_case(&catalog)
            .execute(request(vec![handle(" alice ", true), handle("", false), handle("ally", false)]))
            .await
            .unwrap();

        assert_eq!(model.name, "Alice");
        assert_eq!(model.avatar_url, "/avatars/alice.jpg");
        assert_eq!(model.location, None);
        assert_eq!(model.created_at, 42);
        assert_eq!(model.usernames.len(), 2);

        let stored = catalog
            .models
            .find_by_primary_username("alice")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.id, model.id);
    }

    #[tokio::test]
    async fn validation_order() {
        let catalog = TestCatalog::new();
        let uc = use_case(&catalog);

        let mut nameless = request(vec![]);
        nameless.name = " ".to_string();
        nameless.avatar_url = String::new();
        assert!(matches!(
            uc.execute(nameless).await,
            Err(CreateModelError::MissingName)
        ));

        let mut no_avatar = request(vec![]);
        no_avatar.avatar_url = "  ".to_string();
        assert!(matches!(
            uc.execute(no_avatar).await,
            Err(CreateModelError::MissingAvatar)
        ));

        assert!(matches!(
            uc.execute(request(vec![])).await,
            Err(CreateModelError::NoUsernames)
        ));
        assert!(matches!(
            uc.execute(request(vec![handle("  ", true)])).await,
            Err(CreateModelError::NoValidUsernames)
        ));
        assert!(matches!(
            uc.execute(request(vec![handle("a", false)])).await,
            Err(CreateModelError::MissingPrimary)
        ));
        assert!(matches!(
            uc.execute(request(vec![handle("a", true), handle("b", true)])).await,
            Err(CreateModelError::MultiplePrimaries(2))
        ));
        assert!(matches!(
            uc.execute(request(vec![handle("Ally", true), handle(" ally", false)])).await,
            Err(CreateModelError::DuplicateUsername(_))
        ));
    }

    #[tokio::test]
    async fn rejects_stored_usernames() {
        let catalog = TestCatalog::new();
        let uc = use_case(&catalog);
        uc.execute(request(vec![handle("alice", true)]))
            .await
            .unwrap();

        let err = uc
            .execute(request(vec![handle("bob", true), handle("ALICE", false)]))
            .await
            .unwrap_err();

        match err {
            CreateModelError::UsernameTaken(taken) => assert_eq!(taken, vec!["alice".to_string()]),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn keeps_non_blank_location() {
        let catalog = TestCatalog::new();
        let mut input = request(vec![handle("alice", true)]);
        input.location = Some(" Hanoi ".to_string());

        let model = use_case(&catalog).execute(input).await.unwrap();
        assert_eq!(model.location.as_deref(), Some("Hanoi"));
    }
}
