//! Reader-side commands against the `/data` tree at `client.base_url`.

use std::sync::{Arc, Mutex, PoisonError};

use anyhow::bail;
use mg_app::listing::{load_profile_header, LoadMoreOutcome};
use mg_app::usecases::RandomPost;
use mg_app::{InitialPageData, ListingSession, PageDataLoader, ScrollRestorer, SearchIndex};
use mg_core::catalog::{ModelCard, ModelIndexEntry, PostCard};
use mg_core::config::AppConfig;
use mg_core::listing::ScrollPosition;
use mg_core::paging::{PageItem, PageResource};
use mg_core::ports::{ClockPort, PageSourcePort, SnapshotStorePort, ViewportPort};
use mg_core::routing::Route;
use mg_core::search::SearchOutcome;
use mg_infra::snapshot::InMemorySnapshotStore;
use mg_infra::SystemClock;
use tokio::sync::watch;
use tracing::debug;

use crate::bootstrap::wire_data_client;

/// Terminal stand-in for a browser viewport: remembers the last scroll offset.
#[derive(Debug, Default)]
pub struct TerminalViewport {
    scroll_y: Mutex<f64>,
}

impl ViewportPort for TerminalViewport {
    fn scroll_y(&self) -> f64 {
        *self.scroll_y.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn scroll_to(&self, y: f64) {
        *self.scroll_y.lock().unwrap_or_else(PoisonError::into_inner) = y;
    }
}

pub fn describe_post(card: &PostCard) -> String {
    let username = card.model.primary_username().unwrap_or("-");
    format!(
        "/{}/post/{}  {}  by {}  ({} images, {} videos)",
        username,
        card.post.post_count,
        card.post.title,
        card.model.name,
        card.post.image_count(),
        card.post.video_count()
    )
}

pub fn describe_model(card: &ModelCard) -> String {
    format!(
        "{}  ({})  {} posts",
        card.model.name,
        card.model.display_handles(),
        card.total_posts
    )
}

fn describe_index_entry(entry: &ModelIndexEntry) -> String {
    format!(
        "{}  ({})  {} posts",
        entry.model.name,
        entry.model.display_handles(),
        entry.post_counts.len()
    )
}

/// Mounts a listing for `route`, fetches `more` further pages and renders
/// every item, one per line.
///
/// Snapshots live in a store owned by this call, so a later `browse` starts
/// from page 1. Restoring across navigations needs one
/// [`SnapshotStorePort`] shared by every [`ListingSession`] of the process.
pub async fn browse(config: &AppConfig, route: &str, more: u32) -> anyhow::Result<Vec<String>> {
    let route = Route::parse(route)?;
    let client = wire_data_client(config)?;
    let store: Arc<dyn SnapshotStorePort> = Arc::new(InMemorySnapshotStore::default());

    match route {
        Route::Home | Route::FeedPage(_) => {
            let source: Arc<dyn PageSourcePort<PostCard>> =
                Arc::new(client.page_source(PageResource::HomeFeed));
            let loader = PageDataLoader::new(source.clone());
            let initial = match route {
                Route::FeedPage(page) => loader.load_through(page).await,
                _ => loader.load_first().await,
            };
            run_listing(route, initial, source, store, more, describe_post).await
        }
        Route::Models => {
            let source: Arc<dyn PageSourcePort<ModelCard>> =
                Arc::new(client.page_source(PageResource::ModelsDirectory));
            let initial = PageDataLoader::new(source.clone()).load_first().await;
            run_listing(route, initial, source, store, more, describe_model).await
        }
        Route::Profile { ref username } => {
            let mut lines = match load_profile_header(&*client, username).await {
                Some(card) => vec![describe_model(&card), String::new()],
                None => Vec::new(),
            };
            let source: Arc<dyn PageSourcePort<PostCard>> =
                Arc::new(client.page_source(PageResource::ModelPosts {
                    username: username.clone(),
                }));
            let initial = PageDataLoader::new(source.clone()).load_first().await;
            lines.extend(run_listing(route, initial, source, store, more, describe_post).await?);
            Ok(lines)
        }
        Route::Search { query } => search(config, &query, false).await,
        Route::Post {
            username,
            post_count,
        } => bail!("post pages are read from the catalog: use `show-post {username} {post_count}`"),
    }
}

async fn run_listing<T: PageItem>(
    route: Route,
    initial: InitialPageData<T>,
    source: Arc<dyn PageSourcePort<T>>,
    store: Arc<dyn SnapshotStorePort>,
    more: u32,
    describe: fn(&T) -> String,
) -> anyhow::Result<Vec<String>> {
    let clock: Arc<dyn ClockPort> = Arc::new(SystemClock);
    let restorer = ScrollRestorer::for_route(&route, store, clock);
    let session = ListingSession::new(
        route,
        initial,
        source,
        restorer,
        Arc::new(TerminalViewport::default()),
    );

    let (_scroll_tx, scroll_rx) = watch::channel(ScrollPosition {
        scroll_y: 0.0,
        viewport_height: 0.0,
        document_height: 0.0,
    });
    let subscription = session.mount(scroll_rx).await;

    for _ in 0..more {
        match session.load_more().await {
            LoadMoreOutcome::Appended { page, added } => {
                debug!(page, added, "Fetched next page")
            }
            outcome => {
                debug!(?outcome, "No further pages");
                break;
            }
        }
    }

    let items = session.items();
    let mut lines: Vec<String> = items.iter().map(describe).collect();
    lines.push(format!(
        "-- {} items, page {}{}",
        items.len(),
        session.current_page(),
        if session.has_more() { ", more available" } else { "" }
    ));

    session.on_route_change_start();
    session.unmount(subscription);
    Ok(lines)
}

pub async fn search(config: &AppConfig, query: &str, all: bool) -> anyhow::Result<Vec<String>> {
    let client = wire_data_client(config)?;
    let mut index = SearchIndex::load(&*client).await;

    let lines = match index.search(query) {
        SearchOutcome::Idle => Vec::new(),
        SearchOutcome::QueryTooShort => {
            vec!["Type at least 3 characters to search".to_string()]
        }
        SearchOutcome::NoResults => vec![format!("No models found for \"{}\"", query.trim())],
        SearchOutcome::Matches { total } => {
            if all {
                while index.has_more() {
                    index.load_more();
                }
            }
            let mut lines: Vec<String> = index.visible().iter().map(describe_index_entry).collect();
            lines.push(format!("-- showing {} of {total}", index.visible().len()));
            lines
        }
    };
    Ok(lines)
}

pub async fn random(config: &AppConfig) -> anyhow::Result<Vec<String>> {
    let client = wire_data_client(config)?;
    let route = RandomPost::new(client).execute(&mut rand::thread_rng()).await;

    Ok(vec![match route {
        Some(route) => route.path(),
        None => "No posts available".to_string(),
    }])
}

#[cfg(test)]
mod tests {
    use super::*;
    use mg_core::catalog::{MediaFile, MediaType, Model, Post, Username};
    use mg_core::paging::paginate;
    use mg_core::ports::DatasetWriterPort;
    use mg_infra::fs::{FsDataset, JsonDatasetWriter};

    fn alice() -> Model {
        Model {
            id: "m-1".into(),
            name: "Alice".to_string(),
            avatar_url: "/a.jpg".to_string(),
            location: None,
            created_at: 1,
            usernames: vec![Username::primary("alice"), Username::alias("ally")],
        }
    }

    #[test]
    fn describes_post_with_route_and_counts() {
        let card = PostCard {
            post: Post {
                id: "p-1".into(),
                model_id: "m-1".into(),
                title: "Post 2".to_string(),
                thumbnail_url: "/t.jpg".to_string(),
                post_count: 2,
                published_at: 5,
                created_at: 5,
                media: vec![
                    MediaFile {
                        id: "f-1".into(),
                        url: "/a.jpg".to_string(),
                        media_type: MediaType::Image,
                    },
                    MediaFile {
                        id: "f-2".into(),
                        url: "/b.mp4".to_string(),
                        media_type: MediaType::Video,
                    },
                ],
            },
            model: alice(),
        };

        assert_eq!(
            describe_post(&card),
            "/alice/post/2  Post 2  by Alice  (1 images, 1 videos)"
        );
    }

    fn feed_cards(count: u32) -> Vec<PostCard> {
        (1..=count)
            .rev()
            .map(|n| PostCard {
                post: Post {
                    id: format!("p-{n}").into(),
                    model_id: "m-1".into(),
                    title: format!("Post {n}"),
                    thumbnail_url: format!("/media/alice/post-{n}/thumbnail.jpg"),
                    post_count: n,
                    published_at: i64::from(n),
                    created_at: i64::from(n),
                    media: Vec::new(),
                },
                model: alice(),
            })
            .collect()
    }

    #[tokio::test]
    async fn listing_resumes_from_a_shared_snapshot_store() {
        let dir = tempfile::tempdir().unwrap();
        let writer = JsonDatasetWriter::new(dir.path());
        for page in paginate(&feed_cards(25), 10) {
            writer.write_feed_page(&page).await.unwrap();
        }
        let dataset = FsDataset::new(dir.path());
        let store: Arc<dyn SnapshotStorePort> = Arc::new(InMemorySnapshotStore::default());

        let visit = |more: u32, store: Arc<dyn SnapshotStorePort>| {
            let source: Arc<dyn PageSourcePort<PostCard>> =
                Arc::new(dataset.page_source(PageResource::HomeFeed));
            async move {
                let initial = PageDataLoader::new(source.clone()).load_first().await;
                run_listing(Route::Home, initial, source, store, more, describe_post)
                    .await
                    .unwrap()
            }
        };

        let first = visit(1, store.clone()).await;
        assert_eq!(
            first.last().map(String::as_str),
            Some("-- 20 items, page 2, more available")
        );

        let back = visit(0, store).await;
        assert_eq!(back.len(), 21);
        assert_eq!(back[0], "/alice/post/25  Post 25  by Alice  (0 images, 0 videos)");
        assert_eq!(
            back.last().map(String::as_str),
            Some("-- 20 items, page 2, more available")
        );

        let fresh = visit(0, Arc::new(InMemorySnapshotStore::default())).await;
        assert_eq!(
            fresh.last().map(String::as_str),
            Some("-- 10 items, page 1, more available")
        );
    }

    #[test]
    fn viewport_remembers_scroll_offset() {
        let viewport = TerminalViewport::default();
        viewport.scroll_to(640.0);
        assert_eq!(viewport.scroll_y(), 640.0);
    }
}
