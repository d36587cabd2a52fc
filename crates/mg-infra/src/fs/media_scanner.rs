use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use mg_core::catalog::MediaType;
use mg_core::import::ScannedFile;
use mg_core::ports::MediaScannerPort;
use tracing::debug;

/// Recursive directory walk producing site-absolute paths.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsMediaScanner;

impl FsMediaScanner {
    pub fn new() -> Self {
        Self
    }
}

fn site_path(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let segments: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    Some(format!("/{}", segments.join("/")))
}

#[async_trait]
impl MediaScannerPort for FsMediaScanner {
    async fn scan(&self, root: &Path) -> Result<Vec<ScannedFile>> {
        let mut files = Vec::new();
        let mut pending: Vec<PathBuf> = vec![root.to_path_buf()];

        while let Some(dir) = pending.pop() {
            let mut entries = tokio::fs::read_dir(&dir)
                .await
                .with_context(|| format!("read media dir failed: {}", dir.display()))?;

            while let Some(entry) = entries.next_entry().await? {
                let path = entry.path();
                let file_type = entry.file_type().await?;
                if file_type.is_dir() {
                    pending.push(path);
                    continue;
                }
                if !file_type.is_file() {
                    continue;
                }

                let file_name = entry.file_name().to_string_lossy().into_owned();
                let Some(full_path) = site_path(root, &path) else {
                    continue;
                };
                let size = entry.metadata().await?.len();
                files.push(ScannedFile {
                    full_path,
                    media_type: MediaType::from_file_name(&file_name),
                    file_name,
                    size,
                });
            }
        }

        files.sort_by(|a, b| a.full_path.cmp(&b.full_path));
        debug!(root = %root.display(), files = files.len(), "Media root scanned");
        Ok(files)
    }
}
