use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use mg_core::catalog::{Model, ModelCard, ModelIndex, PostCard};
use mg_core::paging::{
    model_profile_path, FeedMeta, Page, PageResource, ALL_MODELS_PATH, FEED_META_PATH,
};
use mg_core::ports::DatasetWriterPort;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::codec::{encode_page, PageExtras, ProfileDocument};

/// Writes the published dataset as pretty-printed JSON files below `root`.
pub struct JsonDatasetWriter {
    root: PathBuf,
}

impl JsonDatasetWriter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Writes to `<file>.json.tmp` and renames over the target, so readers
    /// see either the previous file or the complete new one.
    async fn write_json<S: Serialize + ?Sized>(&self, relative: &str, value: &S) -> Result<()> {
        let path = self.root.join(relative);
        if let Some(dir) = path.parent() {
            tokio::fs::create_dir_all(dir)
                .await
                .with_context(|| format!("create dataset dir failed: {}", dir.display()))?;
        }

        let json = serde_json::to_string_pretty(value)
            .with_context(|| format!("serialize {relative} failed"))?;

        let tmp_path = path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, json)
            .await
            .with_context(|| format!("write temp file failed: {}", tmp_path.display()))?;
        tokio::fs::rename(&tmp_path, &path).await.with_context(|| {
            format!(
                "rename temp file failed: {} -> {}",
                tmp_path.display(),
                path.display()
            )
        })?;

        debug!(path = %path.display(), "Dataset file written");
        Ok(())
    }
}

#[async_trait]
impl DatasetWriterPort for JsonDatasetWriter {
    async fn write_feed_meta(&self, meta: &FeedMeta) -> Result<()> {
        self.write_json(FEED_META_PATH, meta).await
    }

    async fn write_feed_page(&self, page: &Page<PostCard>) -> Result<()> {
        let value = encode_page(page, PageExtras::new())?;
        self.write_json(&PageResource::HomeFeed.page_path(page.page), &value)
            .await
    }

    async fn write_models_page(&self, page: &Page<ModelCard>) -> Result<()> {
        let value = encode_page(page, PageExtras::new())?;
        self.write_json(&PageResource::ModelsDirectory.page_path(page.page), &value)
            .await
    }

    async fn write_model_profile(&self, username: &str, card: &ModelCard) -> Result<()> {
        let document = ProfileDocument {
            model: card.clone(),
        };
        self.write_json(&model_profile_path(username), &document)
            .await
    }

    async fn write_model_posts_page(
        &self,
        model: &Model,
        username: &str,
        page: &Page<PostCard>,
    ) -> Result<()> {
        let mut extras = PageExtras::new();
        extras.insert("modelId".to_string(), Value::from(model.id.as_str()));
        extras.insert("username".to_string(), Value::from(username));

        let value = encode_page(page, extras)?;
        let resource = PageResource::ModelPosts {
            username: username.to_string(),
        };
        self.write_json(&resource.page_path(page.page), &value).await
    }

    async fn write_model_index(&self, index: &ModelIndex) -> Result<()> {
        self.write_json(ALL_MODELS_PATH, index).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mg_core::catalog::Username;

    fn model() -> Model {
        Model {
            id: "m-1".into(),
            name: "Alice".to_string(),
            avatar_url: "/a.jpg".to_string(),
            location: Some("Hanoi".to_string()),
            created_at: 10,
            usernames: vec![Username::primary("alice")],
        }
    }

    #[tokio::test]
    async fn writes_scoped_page_with_owner_fields() {
        let dir = tempfile::tempdir().unwrap();
        let writer = JsonDatasetWriter::new(dir.path());
        let page: Page<PostCard> = Page::new(Vec::new(), 1, 1);

        writer
            .write_model_posts_page(&model(), "alice", &page)
            .await
            .unwrap();

        let path = dir.path().join("models/alice/posts-page-1.json");
        let value: Value = serde_json::from_slice(&std::fs::read(path).unwrap()).unwrap();
        assert_eq!(value["modelId"], "m-1");
        assert_eq!(value["username"], "alice");
        assert_eq!(value["posts"], serde_json::json!([]));
        assert_eq!(value["hasMore"], false);
    }

    #[tokio::test]
    async fn leaves_no_temp_files_behind() {
        let dir = tempfile::tempdir().unwrap();
        let writer = JsonDatasetWriter::new(dir.path());

        writer
            .write_model_profile(
                "alice",
                &ModelCard {
                    model: model(),
                    total_posts: 4,
                },
            )
            .await
            .unwrap();

        let names: Vec<String> = std::fs::read_dir(dir.path().join("models"))
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["alice.json".to_string()]);
    }
}
