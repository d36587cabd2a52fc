/// Client-side record of the most recently consumed page.
///
/// `current_page` only moves forward, one page at a time, and only after a
/// page has been fetched successfully.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationCursor {
    current_page: u32,
    has_more: bool,
}

impl PaginationCursor {
    pub fn starting_at(current_page: u32, total_pages: u32) -> Self {
        Self {
            current_page,
            has_more: current_page < total_pages,
        }
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn next_page(&self) -> u32 {
        self.current_page + 1
    }

    /// Records a successfully fetched page. Ignores anything other than
    /// the immediate successor so the cursor never skips or repeats.
    pub fn advance(&mut self, fetched_page: u32, has_more: bool) -> bool {
        if fetched_page != self.next_page() {
            return false;
        }
        self.current_page = fetched_page;
        self.has_more = has_more;
        true
    }

    pub fn exhaust(&mut self) {
        self.has_more = false;
    }
}
