//! Catalog administration against the SQLite database.

use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context};
use mg_app::usecases::{
    BulkImport, ClearCatalog, CreateModel, CreatePost, GenerateStaticDataset, GetPost,
    NewMediaItem, NewModel, NewPost, UsernameInput,
};
use mg_core::catalog::{MediaType, PostCard};
use mg_core::config::AppConfig;
use mg_infra::fs::{FsMediaScanner, JsonDatasetWriter};

use crate::bootstrap::wire_catalog;
use crate::cli::{CreateModelArgs, CreatePostArgs};

pub fn new_model_input(args: CreateModelArgs) -> NewModel {
    let mut usernames = vec![UsernameInput {
        username: args.primary,
        is_primary: true,
    }];
    usernames.extend(args.aliases.into_iter().map(|username| UsernameInput {
        username,
        is_primary: false,
    }));

    NewModel {
        name: args.name,
        avatar_url: args.avatar_url,
        location: args.location,
        usernames,
    }
}

pub fn new_post_input(args: CreatePostArgs) -> NewPost {
    NewPost {
        model_id: args.model_id.into(),
        title: args.title,
        thumbnail_url: args.thumbnail_url,
        media: args
            .media
            .into_iter()
            .map(|url| NewMediaItem {
                media_type: MediaType::from_file_name(&url),
                url,
            })
            .collect(),
    }
}

pub async fn create_model(config: &AppConfig, args: CreateModelArgs) -> anyhow::Result<Vec<String>> {
    let deps = wire_catalog(config)?;
    let model = CreateModel::new(deps.models, deps.clock)
        .execute(new_model_input(args))
        .await?;

    Ok(vec![format!(
        "Created model {} ({}) id={}",
        model.name,
        model.display_handles(),
        model.id
    )])
}

pub async fn create_post(config: &AppConfig, args: CreatePostArgs) -> anyhow::Result<Vec<String>> {
    let deps = wire_catalog(config)?;
    let created = CreatePost::new(deps.models, deps.posts, deps.clock)
        .execute(new_post_input(args))
        .await?;

    Ok(vec![format!(
        "Created post \"{}\" at /{}/post/{}",
        created.post.title, created.username, created.post.post_count
    )])
}

pub async fn bulk_import(config: &AppConfig, root: &Path) -> anyhow::Result<Vec<String>> {
    let deps = wire_catalog(config)?;
    let report = BulkImport::new(
        Arc::new(FsMediaScanner::new()),
        deps.models,
        deps.posts,
        deps.clock,
    )
    .execute(root)
    .await?;

    let json = serde_json::to_string_pretty(&report).context("Failed to render import report")?;
    Ok(json.lines().map(str::to_string).collect())
}

pub async fn generate(config: &AppConfig) -> anyhow::Result<Vec<String>> {
    let deps = wire_catalog(config)?;
    let report = GenerateStaticDataset::new(
        deps.models,
        deps.posts,
        Arc::new(JsonDatasetWriter::new(&config.dataset.data_dir)),
        deps.clock,
        config.paging.posts_per_page,
        config.paging.models_per_page,
    )
    .execute()
    .await?;

    let mut lines = vec![
        format!("Dataset written to {}", config.dataset.data_dir.display()),
        format!(
            "{} posts in {} feed pages, {} model pages, {} profiles",
            report.total_posts, report.feed_pages, report.models_pages, report.profiles
        ),
    ];
    lines.extend(
        report
            .skipped_models
            .iter()
            .map(|name| format!("Skipped {name}: no primary username")),
    );
    Ok(lines)
}

pub async fn clear(config: &AppConfig, confirmed: bool) -> anyhow::Result<Vec<String>> {
    if !confirmed {
        bail!("Refusing to clear the catalog without --yes");
    }
    let deps = wire_catalog(config)?;
    ClearCatalog::new(deps.models).execute().await?;
    Ok(vec!["Catalog cleared".to_string()])
}

pub async fn show_post(
    config: &AppConfig,
    username: &str,
    post_count: u32,
) -> anyhow::Result<Vec<String>> {
    let deps = wire_catalog(config)?;
    let card = GetPost::new(deps.models, deps.posts)
        .execute(username, post_count)
        .await?;
    Ok(render_post_detail(&card))
}

pub fn render_post_detail(card: &PostCard) -> Vec<String> {
    let mut lines = vec![
        card.post.title.clone(),
        format!("by {} ({})", card.model.name, card.model.display_handles()),
        format!(
            "{} images, {} videos",
            card.post.image_count(),
            card.post.video_count()
        ),
        format!("thumbnail: {}", card.post.thumbnail_url),
    ];
    lines.extend(
        card.post
            .media
            .iter()
            .enumerate()
            .map(|(idx, media)| format!("{:>3}. [{}] {}", idx + 1, media.media_type, media.url)),
    );
    lines
}
