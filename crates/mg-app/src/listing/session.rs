use std::sync::Arc;
use std::time::Duration;

use mg_core::listing::{ListingPhase, ScrollPosition, LOAD_MORE_THRESHOLD_PX};
use mg_core::paging::PageItem;
use mg_core::ports::{PageSourcePort, ViewportPort};
use mg_core::routing::Route;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::{IncrementalFetcher, InitialPageData, ScrollRestorer};

/// Wait after applying restored items before scrolling, so the first paint
/// lands before the programmatic scroll.
pub const RESTORE_PAINT_DELAY: Duration = Duration::from_millis(100);

/// Fetch-on-scroll listener attached to a mounted listing. Dropping the
/// subscription detaches the listener.
#[must_use = "dropping the subscription detaches the scroll listener"]
pub struct ScrollSubscription {
    listener: JoinHandle<()>,
}

impl ScrollSubscription {
    pub fn is_active(&self) -> bool {
        !self.listener.is_finished()
    }
}

impl Drop for ScrollSubscription {
    fn drop(&mut self) {
        self.listener.abort();
    }
}

/// One mounted listing page (home feed, models directory, model profile):
/// `Initializing → Restoring → Ready → FetchingMore → Ready | Exhausted`.
pub struct ListingSession<T: PageItem> {
    route: Route,
    total_pages: u32,
    fetcher: Arc<IncrementalFetcher<T>>,
    restorer: ScrollRestorer<T>,
    viewport: Arc<dyn ViewportPort>,
    paint_delay: Duration,
}

impl<T: PageItem> ListingSession<T> {
    pub fn new(
        route: Route,
        initial: InitialPageData<T>,
        source: Arc<dyn PageSourcePort<T>>,
        restorer: ScrollRestorer<T>,
        viewport: Arc<dyn ViewportPort>,
    ) -> Self {
        let total_pages = initial.total_pages;
        Self {
            route,
            total_pages,
            fetcher: Arc::new(IncrementalFetcher::new(source, initial)),
            restorer,
            viewport,
            paint_delay: RESTORE_PAINT_DELAY,
        }
    }

    pub fn with_paint_delay(mut self, delay: Duration) -> Self {
        self.paint_delay = delay;
        self
    }

    /// Runs the restoration protocol, then attaches the fetch-on-scroll
    /// listener to `scroll_events`.
    pub async fn mount(&self, scroll_events: watch::Receiver<ScrollPosition>) -> ScrollSubscription {
        self.fetcher.begin_restore();

        match self.restorer.restore_snapshot() {
            Some(snapshot) => {
                info!(
                    route = %self.route,
                    current_page = snapshot.current_page,
                    items = snapshot.items.len(),
                    "Restoring listing"
                );
                self.fetcher
                    .apply_restored(snapshot.items, snapshot.current_page, self.total_pages);
                tokio::time::sleep(self.paint_delay).await;
                self.viewport.scroll_to(snapshot.scroll_y);
            }
            None => debug!(route = %self.route, "No snapshot, using initial data"),
        }

        self.fetcher.settle();

        ScrollSubscription {
            listener: tokio::spawn(listen(self.fetcher.clone(), scroll_events)),
        }
    }

    /// Saves the list state before a client-side navigation away.
    pub fn on_route_change_start(&self) {
        self.save();
    }

    /// Saves the list state when the tab or app is torn down.
    pub fn on_unload(&self) {
        self.save();
    }

    /// Detaches the listener; fetches still pending are dropped on arrival.
    pub fn unmount(&self, subscription: ScrollSubscription) {
        drop(subscription);
        self.fetcher.retire();
        debug!(route = %self.route, "Listing unmounted");
    }

    pub async fn load_more(&self) -> super::LoadMoreOutcome {
        self.fetcher.load_more().await
    }

    fn save(&self) {
        if !self.fetcher.is_alive() {
            return;
        }
        let result = self.restorer.save_snapshot(
            self.viewport.scroll_y(),
            self.fetcher.items(),
            self.fetcher.current_page(),
        );
        if let Err(err) = result {
            warn!(error = %err, route = %self.route, "Failed to save listing snapshot");
        }
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn items(&self) -> Vec<T> {
        self.fetcher.items()
    }

    pub fn phase(&self) -> ListingPhase {
        self.fetcher.phase()
    }

    pub fn has_more(&self) -> bool {
        self.fetcher.has_more()
    }

    pub fn current_page(&self) -> u32 {
        self.fetcher.current_page()
    }
}

async fn listen<T: PageItem>(
    fetcher: Arc<IncrementalFetcher<T>>,
    mut scroll_events: watch::Receiver<ScrollPosition>,
) {
    while scroll_events.changed().await.is_ok() {
        let position = *scroll_events.borrow_and_update();
        if !position.is_near_bottom(LOAD_MORE_THRESHOLD_PX) {
            continue;
        }
        // requests are not cancelled with the listener
        let fetcher = fetcher.clone();
        tokio::spawn(async move {
            fetcher.load_more().await;
        });
    }
}
