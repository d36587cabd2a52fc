use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use mg_core::catalog::{MediaFile, MediaType, Model, Post};
use mg_core::ids::{MediaFileId, PostId};
use mg_core::import::{parse_media_path, ScannedFile};
use mg_core::ports::{ClockPort, MediaScannerPort, ModelRepositoryPort, PostRepositoryPort};
use serde::Serialize;
use tracing::{info, warn};

/// What a scan found, before anything is written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanSummary {
    pub total_files: usize,
    pub posts_found: usize,
    pub posts: Vec<ScannedPost>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScannedPost {
    pub username: String,
    pub post_number: u32,
    pub file_count: usize,
    pub has_image: bool,
    pub has_video: bool,
    pub has_thumbnail: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub total_files_scanned: usize,
    pub posts_created: usize,
    pub errors: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    pub scan: ScanSummary,
    pub created: usize,
    pub posts: Vec<Post>,
    pub errors: Vec<String>,
    pub summary: ImportSummary,
}

#[derive(Debug, thiserror::Error)]
pub enum BulkImportError {
    #[error("no files found under {0}")]
    NoFiles(String),

    #[error("scanning media root failed: {0:#}")]
    Scan(anyhow::Error),

    #[error(transparent)]
    Repository(#[from] anyhow::Error),
}

/// Groups convention-following files per post, keyed in first-seen order.
fn group_by_post<'a>(files: &'a [ScannedFile]) -> Vec<((String, u32), Vec<&'a ScannedFile>)> {
    let mut order: Vec<(String, u32)> = Vec::new();
    let mut groups: HashMap<(String, u32), Vec<&ScannedFile>> = HashMap::new();

    for file in files {
        let Some(info) = parse_media_path(&file.full_path) else {
            continue;
        };
        let key = (info.username, info.post_number);
        if !groups.contains_key(&key) {
            order.push(key.clone());
        }
        groups.entry(key).or_default().push(file);
    }

    order
        .into_iter()
        .filter_map(|key| groups.remove(&key).map(|files| (key, files)))
        .collect()
}

pub fn summarize_scan(files: &[ScannedFile]) -> ScanSummary {
    let posts: Vec<ScannedPost> = group_by_post(files)
        .into_iter()
        .map(|((username, post_number), group)| ScannedPost {
            username,
            post_number,
            file_count: group.len(),
            has_image: group.iter().any(|f| f.media_type == MediaType::Image),
            has_video: group.iter().any(|f| f.media_type == MediaType::Video),
            has_thumbnail: group.iter().any(|f| f.is_thumbnail()),
        })
        .collect();

    ScanSummary {
        total_files: files.len(),
        posts_found: posts.len(),
        posts,
    }
}

/// First file named like a thumbnail, else the first image.
fn pick_thumbnail<'a>(files: &[&'a ScannedFile]) -> Option<&'a ScannedFile> {
    files
        .iter()
        .find(|f| f.is_thumbnail())
        .or_else(|| files.iter().find(|f| f.media_type == MediaType::Image))
        .copied()
}

/// Creates posts from a `/media/{username}/post-{n}/` directory tree.
///
/// Posts whose number already exists for the model are skipped. Every
/// other problem becomes an entry in the report; the import itself only
/// fails if the tree cannot be read or the catalog cannot be queried.
pub struct BulkImport {
    scanner: Arc<dyn MediaScannerPort>,
    models: Arc<dyn ModelRepositoryPort>,
    posts: Arc<dyn PostRepositoryPort>,
    clock: Arc<dyn ClockPort>,
}

impl BulkImport {
    pub fn new(
        scanner: Arc<dyn MediaScannerPort>,
        models: Arc<dyn ModelRepositoryPort>,
        posts: Arc<dyn PostRepositoryPort>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            scanner,
            models,
            posts,
            clock,
        }
    }

    #[tracing::instrument(name = "usecase.bulk_import.execute", skip(self), fields(root = %root.display()))]
    pub async fn execute(&self, root: &Path) -> Result<ImportReport, BulkImportError> {
        let files = self
            .scanner
            .scan(root)
            .await
            .map_err(BulkImportError::Scan)?;
        if files.is_empty() {
            return Err(BulkImportError::NoFiles(root.display().to_string()));
        }
        let scan = summarize_scan(&files);
        info!(files = files.len(), posts = scan.posts_found, "Media root scanned");

        let mut by_username: HashMap<String, (Model, Vec<u32>)> = HashMap::new();
        for model in self.models.list_models().await? {
            let Some(username) = model.primary_username().map(str::to_string) else {
                continue;
            };
            let existing = self.posts.list_post_counts(&model.id).await?;
            by_username.insert(username, (model, existing));
        }

        let mut errors = Vec::new();
        let mut pending = Vec::new();
        for ((username, post_number), group) in group_by_post(&files) {
            let Some((model, existing)) = by_username.get(&username) else {
                // one entry per file
                errors.extend(group.iter().map(|_| format!("model '{username}' not found")));
                continue;
            };
            if existing.contains(&post_number) {
                continue;
            }
            let Some(thumbnail) = pick_thumbnail(&group) else {
                errors.push(format!("post {post_number} of {username} has no thumbnail"));
                continue;
            };

            let now = self.clock.now_ms();
            pending.push(Post {
                id: PostId::new(),
                model_id: model.id.clone(),
                title: format!("Post {post_number}"),
                thumbnail_url: thumbnail.full_path.clone(),
                post_count: post_number,
                published_at: now,
                created_at: now,
                media: group
                    .iter()
                    .map(|f| MediaFile {
                        id: MediaFileId::new(),
                        url: f.full_path.clone(),
                        media_type: f.media_type,
                    })
                    .collect(),
            });
        }

        let mut created = Vec::new();
        for post in pending {
            match self.posts.insert_post(&post).await {
                Ok(()) => created.push(post),
                Err(err) => {
                    warn!(error = %err, post_count = post.post_count, "Import of post failed");
                    errors.push(format!("failed to create post {}: {err}", post.post_count));
                }
            }
        }

        info!(created = created.len(), errors = errors.len(), "Bulk import finished");
        Ok(ImportReport {
            summary: ImportSummary {
                total_files_scanned: files.len(),
                posts_created: created.len(),
                errors: errors.len(),
            },
            scan,
            created: created.len(),
            posts: created,
            errors,
        })
    }
}
