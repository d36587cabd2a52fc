//! Saved list state used to rebuild a listing after back-navigation.

use serde::{Deserialize, Serialize};

/// Snapshots older than this are treated as absent and purged on read.
pub const SNAPSHOT_TTL_MS: i64 = 30 * 60 * 1000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestorationSnapshot<T> {
    pub scroll_y: f64,
    pub items: Vec<T>,
    pub current_page: u32,
    /// Epoch milliseconds at save time.
    pub timestamp: i64,
}

impl<T> RestorationSnapshot<T> {
    pub fn is_expired(&self, now_ms: i64) -> bool {
        now_ms - self.timestamp > SNAPSHOT_TTL_MS
    }
}

/// Store slot for a route path.
pub fn snapshot_key(route_path: &str) -> String {
    format!("scroll_{route_path}")
}
