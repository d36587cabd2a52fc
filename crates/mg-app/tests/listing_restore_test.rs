//! Listing lifecycle over a dataset on disk: scroll, leave, come back.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use mg_app::{ListingSession, LoadMoreOutcome, PageDataLoader, ScrollRestorer};
use mg_core::catalog::{Model, Post, PostCard, Username};
use mg_core::listing::{ListingPhase, ScrollPosition};
use mg_core::paging::{paginate, PageResource};
use mg_core::ports::{
    ClockPort, DatasetWriterPort, PageSourcePort, SnapshotStorePort, ViewportPort,
};
use mg_core::restore::SNAPSHOT_TTL_MS;
use mg_core::routing::Route;
use mg_infra::fs::{FsDataset, JsonDatasetWriter};
use mg_infra::snapshot::InMemorySnapshotStore;
use tokio::sync::watch;

struct SettableClock(Mutex<i64>);

impl ClockPort for SettableClock {
    fn now_ms(&self) -> i64 {
        *self.0.lock().unwrap()
    }
}

#[derive(Default)]
struct Viewport(Mutex<f64>);

impl ViewportPort for Viewport {
    fn scroll_y(&self) -> f64 {
        *self.0.lock().unwrap()
    }

    fn scroll_to(&self, y: f64) {
        *self.0.lock().unwrap() = y;
    }
}

fn cards(count: u32) -> Vec<PostCard> {
    let model = Model {
        id: "m-1".into(),
        name: "Alice".to_string(),
        avatar_url: "/a.jpg".to_string(),
        location: None,
        created_at: 0,
        usernames: vec![Username::primary("alice")],
    };
    (1..=count)
        .rev()
        .map(|n| PostCard {
            post: Post {
                id: format!("p-{n}").into(),
                model_id: model.id.clone(),
                title: format!("Post {n}"),
                thumbnail_url: format!("/media/alice/post-{n}/thumbnail.jpg"),
                post_count: n,
                published_at: i64::from(n),
                created_at: i64::from(n),
                media: Vec::new(),
            },
            model: model.clone(),
        })
        .collect()
}

async fn open(
    source: &Arc<dyn PageSourcePort<PostCard>>,
    store: &Arc<dyn SnapshotStorePort>,
    clock: &Arc<SettableClock>,
) -> (ListingSession<PostCard>, Arc<Viewport>) {
    let viewport = Arc::new(Viewport::default());
    let initial = PageDataLoader::new(source.clone()).load_first().await;
    let restorer = ScrollRestorer::for_route(&Route::Home, store.clone(), clock.clone());
    let session = ListingSession::new(
        Route::Home,
        initial,
        source.clone(),
        restorer,
        viewport.clone(),
    )
    .with_paint_delay(Duration::ZERO);
    (session, viewport)
}

fn idle() -> ScrollPosition {
    ScrollPosition {
        scroll_y: 0.0,
        viewport_height: 800.0,
        document_height: 5000.0,
    }
}

#[tokio::test]
async fn back_navigation_restores_scrolled_list() {
    let dir = tempfile::tempdir().unwrap();
    let writer = JsonDatasetWriter::new(dir.path());
    for page in paginate(&cards(25), 10) {
        writer.write_feed_page(&page).await.unwrap();
    }

    let source: Arc<dyn PageSourcePort<PostCard>> =
        Arc::new(FsDataset::new(dir.path()).page_source(PageResource::HomeFeed));
    let store: Arc<dyn SnapshotStorePort> = Arc::new(InMemorySnapshotStore::default());
    let clock = Arc::new(SettableClock(Mutex::new(1_000)));

    // first visit: scroll through two more pages, then navigate away
    let (first, first_viewport) = open(&source, &store, &clock).await;
    let (_tx, rx) = watch::channel(idle());
    let subscription = first.mount(rx).await;
    assert_eq!(first.items().len(), 10);
    assert!(matches!(
        first.load_more().await,
        LoadMoreOutcome::Appended { page: 2, added: 10 }
    ));
    assert!(matches!(
        first.load_more().await,
        LoadMoreOutcome::Appended { page: 3, added: 5 }
    ));
    assert_eq!(first.phase(), ListingPhase::Exhausted);
    first_viewport.scroll_to(2400.0);
    first.on_route_change_start();
    first.unmount(subscription);

    // back-navigation: same 25 items, same offset, nothing left to fetch
    let (second, second_viewport) = open(&source, &store, &clock).await;
    let (_tx, rx) = watch::channel(idle());
    let subscription = second.mount(rx).await;
    let titles: Vec<String> = second.items().iter().map(|c| c.post.title.clone()).collect();
    assert_eq!(titles.len(), 25);
    assert_eq!(titles.first().map(String::as_str), Some("Post 25"));
    assert_eq!(titles.last().map(String::as_str), Some("Post 1"));
    assert_eq!(second_viewport.scroll_y(), 2400.0);
    assert_eq!(second.current_page(), 3);
    assert!(!second.has_more());
    second.unmount(subscription);

    // the snapshot outlived its lifetime: fresh first page
    *clock.0.lock().unwrap() += SNAPSHOT_TTL_MS + 1;
    let (third, third_viewport) = open(&source, &store, &clock).await;
    let (_tx, rx) = watch::channel(idle());
    let subscription = third.mount(rx).await;
    assert_eq!(third.items().len(), 10);
    assert_eq!(third.current_page(), 1);
    assert_eq!(third_viewport.scroll_y(), 0.0);
    third.unmount(subscription);
}
