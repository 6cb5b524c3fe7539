//! Pagination coordinator
//!
//! A persistent, UI-facing cursor set: one page cursor per side filter
//! dimension (`left`, `right`, `both`), plus the filter, page size, and
//! depth bounds. Changing the filter or the page size invalidates prior
//! pagination position and resets every cursor to 1. The coordinator never
//! reaches a terminal state; it is reused across materializations.

use crate::config::ViewerConfig;
use crate::error::{DownlineError, DownlineResult};
use crate::models::{RootSnapshot, Side, SideFilter};
use crate::query::{TreeQuery, MAX_PAGE_SIZE};

/// What the current snapshot says about the active side's page range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageWindow {
    pub total_pages: u32,
    pub has_next: bool,
    pub has_previous: bool,
}

impl PageWindow {
    /// Summarize the envelopes of every branch the filter admits.
    ///
    /// With `Both`, the range spans `max(total_pages)` over the two
    /// branches and movement is possible while either branch can still
    /// move. Legacy unpaged collections contribute a single page.
    pub fn from_snapshot(snapshot: &RootSnapshot, filter: SideFilter) -> Self {
        let mut window = PageWindow::default();

        for branch in [Side::Left, Side::Right] {
            if !filter.admits(branch) {
                continue;
            }
            let Some(child) = snapshot.child(branch) else {
                continue;
            };
            for collection_side in [Side::Left, Side::Right] {
                let Some(collection) = child.side_members(collection_side) else {
                    continue;
                };
                match collection.envelope() {
                    Some(envelope) => {
                        window.total_pages = window.total_pages.max(envelope.total_pages);
                        window.has_next |= envelope.next.is_some();
                        window.has_previous |= envelope.previous.is_some();
                    }
                    None => {
                        window.total_pages = window.total_pages.max(1);
                    }
                }
            }
        }
        window
    }
}

/// Per-side and combined page cursors with the active filter dimensions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageCursors {
    left: u32,
    right: u32,
    both: u32,
    side: SideFilter,
    page_size: u32,
    min_depth: Option<u32>,
    max_depth: Option<u32>,
}

impl PageCursors {
    /// Initial state: page 1 everywhere, defaults from configuration
    pub fn new(config: &ViewerConfig) -> Self {
        Self {
            left: 1,
            right: 1,
            both: 1,
            side: config.side,
            page_size: config.page_size,
            min_depth: config.min_depth,
            max_depth: config.max_depth,
        }
    }

    pub fn side(&self) -> SideFilter {
        self.side
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Cursor of the active side filter
    pub fn active_page(&self) -> u32 {
        match self.side {
            SideFilter::Left => self.left,
            SideFilter::Right => self.right,
            SideFilter::Both => self.both,
        }
    }

    /// Switch side filter; a different filter dimension invalidates prior
    /// pagination position, so all three cursors reset
    pub fn set_side(&mut self, side: SideFilter) {
        if self.side != side {
            self.side = side;
            self.reset_cursors();
        }
    }

    pub fn set_page_size(&mut self, page_size: u32) -> DownlineResult<()> {
        if page_size < 1 || page_size > MAX_PAGE_SIZE {
            return Err(DownlineError::InvalidPageSize {
                page_size,
                max: MAX_PAGE_SIZE,
            });
        }
        if self.page_size != page_size {
            self.page_size = page_size;
            self.reset_cursors();
        }
        Ok(())
    }

    /// Depth bounds do not shift page boundaries upstream, so cursors are
    /// kept where they are
    pub fn set_depth_bounds(
        &mut self,
        min_depth: Option<u32>,
        max_depth: Option<u32>,
    ) -> DownlineResult<()> {
        if let (Some(min), Some(max)) = (min_depth, max_depth) {
            if min > max {
                return Err(DownlineError::InvertedDepthBounds { min, max });
            }
        }
        self.min_depth = min_depth;
        self.max_depth = max_depth;
        Ok(())
    }

    pub fn can_advance(&self, window: &PageWindow) -> bool {
        window.has_next && self.active_page() < window.total_pages
    }

    pub fn can_rewind(&self, window: &PageWindow) -> bool {
        window.has_previous && self.active_page() > 1
    }

    /// Move the active cursor forward; returns whether it moved
    pub fn advance(&mut self, window: &PageWindow) -> bool {
        if !self.can_advance(window) {
            return false;
        }
        let page = self.active_page() + 1;
        self.set_active_page(page);
        true
    }

    /// Move the active cursor back; returns whether it moved
    pub fn rewind(&mut self, window: &PageWindow) -> bool {
        if !self.can_rewind(window) {
            return false;
        }
        let page = self.active_page() - 1;
        self.set_active_page(page);
        true
    }

    /// Clamp the active cursor into the window before the next fetch, so an
    /// out-of-range page is never requested
    pub fn clamp_to(&mut self, window: &PageWindow) {
        let last = window.total_pages.max(1);
        if self.active_page() > last {
            self.set_active_page(last);
        }
    }

    /// The query the next fetch should use
    pub fn query(&self, root_id: i64) -> TreeQuery {
        TreeQuery {
            root_id,
            side: self.side,
            page: self.active_page(),
            page_size: self.page_size,
            min_depth: self.min_depth,
            max_depth: self.max_depth,
        }
    }

    fn reset_cursors(&mut self) {
        self.left = 1;
        self.right = 1;
        self.both = 1;
    }

    fn set_active_page(&mut self, page: u32) {
        match self.side {
            SideFilter::Left => self.left = page,
            SideFilter::Right => self.right = page,
            SideFilter::Both => self.both = page,
        }
    }
}

impl Default for PageCursors {
    fn default() -> Self {
        Self::new(&ViewerConfig::default())
    }
}
