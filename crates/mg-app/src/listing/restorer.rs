use std::marker::PhantomData;
use std::sync::Arc;

use mg_core::paging::PageItem;
use mg_core::ports::{ClockPort, SnapshotStoreError, SnapshotStorePort};
use mg_core::restore::{snapshot_key, RestorationSnapshot};
use mg_core::routing::Route;
use tracing::{debug, warn};

/// Saves and restores one route's list state across back-navigation.
pub struct ScrollRestorer<T> {
    store: Arc<dyn SnapshotStorePort>,
    clock: Arc<dyn ClockPort>,
    key: String,
    _item: PhantomData<fn() -> T>,
}

impl<T: PageItem> ScrollRestorer<T> {
    pub fn new(
        route_path: &str,
        store: Arc<dyn SnapshotStorePort>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            store,
            clock,
            key: snapshot_key(route_path),
            _item: PhantomData,
        }
    }

    pub fn for_route(
        route: &Route,
        store: Arc<dyn SnapshotStorePort>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self::new(&route.path(), store, clock)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Overwrites the route's slot with the current list state.
    pub fn save_snapshot(
        &self,
        scroll_y: f64,
        items: Vec<T>,
        current_page: u32,
    ) -> Result<(), SnapshotStoreError> {
        let snapshot = RestorationSnapshot {
            scroll_y,
            items,
            current_page,
            timestamp: self.clock.now_ms(),
        };
        let json = serde_json::to_string(&snapshot)
            .map_err(|e| SnapshotStoreError::Write(e.to_string()))?;

        self.store.set(&self.key, json)?;
        debug!(key = %self.key, current_page, items = snapshot.items.len(), "Snapshot saved");
        Ok(())
    }

    /// Returns the saved state unless it is missing, unreadable, or older
    /// than the TTL. Stale and unreadable slots are purged. A fresh slot is
    /// left in place.
    pub fn restore_snapshot(&self) -> Option<RestorationSnapshot<T>> {
        let raw = match self.store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                warn!(error = %err, key = %self.key, "Snapshot store unreadable, skipping restoration");
                return None;
            }
        };

        let snapshot: RestorationSnapshot<T> = match serde_json::from_str(&raw) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                warn!(error = %err, key = %self.key, "Discarding unreadable snapshot");
                self.purge();
                return None;
            }
        };

        if snapshot.is_expired(self.clock.now_ms()) {
            debug!(key = %self.key, saved_at = snapshot.timestamp, "Purging stale snapshot");
            self.purge();
            return None;
        }

        Some(snapshot)
    }

    fn purge(&self) {
        if let Err(err) = self.store.delete(&self.key) {
            warn!(error = %err, key = %self.key, "Failed to purge snapshot");
        }
    }
}
