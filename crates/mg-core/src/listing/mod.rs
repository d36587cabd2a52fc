//! Per-page listing lifecycle and scroll geometry.

/// Distance from the document bottom at which the next page is requested.
pub const LOAD_MORE_THRESHOLD_PX: f64 = 100.0;

/// `Initializing → Restoring → Ready → FetchingMore → Ready | Exhausted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingPhase {
    Initializing,
    Restoring,
    Ready,
    FetchingMore,
    /// Terminal until a full reload.
    Exhausted,
}

impl ListingPhase {
    /// Phase to settle in once no fetch is running.
    pub fn settled(has_more: bool, displayed_items: usize) -> Self {
        if !has_more && displayed_items > 0 {
            ListingPhase::Exhausted
        } else {
            ListingPhase::Ready
        }
    }

    pub fn accepts_fetch(&self) -> bool {
        matches!(self, ListingPhase::Ready)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollPosition {
    pub scroll_y: f64,
    pub viewport_height: f64,
    pub document_height: f64,
}

impl ScrollPosition {
    pub fn is_near_bottom(&self, threshold: f64) -> bool {
        self.viewport_height + self.scroll_y >= self.document_height - threshold
    }
}
