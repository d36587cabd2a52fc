use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use mg_core::listing::ListingPhase;
use mg_core::paging::{PageItem, PaginationCursor};
use mg_core::ports::PageSourcePort;
use tracing::{debug, info, warn};

use super::InitialPageData;

/// Why a `load_more` call did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Another fetch is pending; this trigger is coalesced into it.
    InFlight,
    /// Initializing or restoring.
    NotReady,
    /// No further pages.
    Exhausted,
    /// The owning page has been torn down.
    Unmounted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadMoreOutcome {
    Skipped(SkipReason),
    Appended { page: u32, added: usize },
    /// The fetch failed; `has_more` is now false.
    Failed,
    /// The source answered with a page other than the one requested; nothing
    /// was appended and `has_more` is now false.
    OutOfSequence { requested: u32, received: u32 },
    /// The page unmounted while the request was pending; the result was dropped.
    Discarded,
}

struct FetcherState<T> {
    items: Vec<T>,
    cursor: PaginationCursor,
    phase: ListingPhase,
}

/// Releases the in-flight flag on every exit path.
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Appends the next page of a dataset to the displayed list.
///
/// Owned by a single listing page. At most one request runs at a time, pages
/// are requested strictly in order, and failures stop the listing instead of
/// retrying.
pub struct IncrementalFetcher<T: PageItem> {
    source: Arc<dyn PageSourcePort<T>>,
    state: Mutex<FetcherState<T>>,
    in_flight: AtomicBool,
    alive: AtomicBool,
}

impl<T: PageItem> IncrementalFetcher<T> {
    pub fn new(source: Arc<dyn PageSourcePort<T>>, initial: InitialPageData<T>) -> Self {
        Self {
            source,
            state: Mutex::new(FetcherState {
                items: initial.items,
                cursor: PaginationCursor::starting_at(initial.start_page, initial.total_pages),
                phase: ListingPhase::Initializing,
            }),
            in_flight: AtomicBool::new(false),
            alive: AtomicBool::new(true),
        }
    }

    fn state(&self) -> MutexGuard<'_, FetcherState<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn begin_restore(&self) {
        self.state().phase = ListingPhase::Restoring;
    }

    /// Replaces the displayed list with restored items; `has_more` is
    /// recomputed from the dataset's page count.
    pub fn apply_restored(&self, items: Vec<T>, current_page: u32, total_pages: u32) {
        let mut state = self.state();
        state.items = items;
        state.cursor = PaginationCursor::starting_at(current_page, total_pages);
    }

    /// Leaves initialization or restoration for `Ready` or `Exhausted`.
    pub fn settle(&self) {
        let mut state = self.state();
        state.phase = ListingPhase::settled(state.cursor.has_more(), state.items.len());
    }

    /// Marks the owner as torn down; pending results are dropped on arrival.
    pub fn retire(&self) {
        self.alive.store(false, Ordering::Release);
    }

    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Acquire)
    }

    pub fn items(&self) -> Vec<T> {
        self.state().items.clone()
    }

    pub fn len(&self) -> usize {
        self.state().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn current_page(&self) -> u32 {
        self.state().cursor.current_page()
    }

    pub fn has_more(&self) -> bool {
        self.state().cursor.has_more()
    }

    pub fn phase(&self) -> ListingPhase {
        self.state().phase
    }

    pub async fn load_more(&self) -> LoadMoreOutcome {
        if !self.is_alive() {
            return LoadMoreOutcome::Skipped(SkipReason::Unmounted);
        }
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return LoadMoreOutcome::Skipped(SkipReason::InFlight);
        }
        let _guard = InFlightGuard(&self.in_flight);

        let next_page = {
            let mut state = self.state();
            if !state.cursor.has_more() {
                return LoadMoreOutcome::Skipped(SkipReason::Exhausted);
            }
            if !state.phase.accepts_fetch() {
                return LoadMoreOutcome::Skipped(SkipReason::NotReady);
            }
            state.phase = ListingPhase::FetchingMore;
            state.cursor.next_page()
        };

        debug!(page = next_page, "Fetching next page");
        let result = self.source.fetch_page(next_page).await;

        if !self.is_alive() {
            debug!(page = next_page, "Listing unmounted, dropping fetched page");
            return LoadMoreOutcome::Discarded;
        }

        let mut state = self.state();
        let outcome = match result {
            Ok(page) => {
                let fetched = page.page;
                if state.cursor.advance(fetched, page.has_more) {
                    let added = page.items.len();
                    state.items.extend(page.items);
                    info!(page = fetched, added, has_more = page.has_more, "Page appended");
                    LoadMoreOutcome::Appended {
                        page: fetched,
                        added,
                    }
                } else {
                    warn!(requested = next_page, received = fetched, "Out-of-sequence page, stopping listing");
                    state.cursor.exhaust();
                    LoadMoreOutcome::OutOfSequence {
                        requested: next_page,
                        received: fetched,
                    }
                }
            }
            Err(err) => {
                warn!(error = %err, page = next_page, "Fetching more failed, stopping listing");
                state.cursor.exhaust();
                LoadMoreOutcome::Failed
            }
        };
        state.phase = ListingPhase::settled(state.cursor.has_more(), state.items.len());
        outcome
    }
}
