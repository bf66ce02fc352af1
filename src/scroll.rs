//! Scroll targets - receivers of page-scroll commands.
//!
//! The engine forwards recognized gestures to a [`ScrollTarget`]
//! synchronously from its tick loop. Targets must be cheap, must not block,
//! and must never call back into the engine. Calling a target while no
//! scrollable content is meaningfully bound is a no-op, not an error.

use tracing::{debug, info};

/// A scrollable view that accepts page-level scroll commands.
pub trait ScrollTarget: Send + 'static {
    fn page_scroll_up(&mut self);
    fn page_scroll_down(&mut self);
}

/// Page-windowed cursor over a list of items.
///
/// Keeps the index of the top visible row and moves it one page at a time,
/// clamped to the content bounds. A partial last page is reachable; an
/// empty list pins the window at zero.
#[derive(Debug, Clone)]
pub struct ListScrollTarget {
    item_count: usize,
    page_size: usize,
    top_row: usize,
}

impl ListScrollTarget {
    pub fn new(item_count: usize, page_size: usize) -> Self {
        Self {
            item_count,
            page_size: page_size.max(1),
            top_row: 0,
        }
    }

    /// Index of the top visible row.
    pub fn top_row(&self) -> usize {
        self.top_row
    }

    /// Largest valid top-row index for the current content.
    fn max_top_row(&self) -> usize {
        self.item_count.saturating_sub(self.page_size)
    }

    /// Replaces the backing item count, clamping the window into range.
    pub fn set_item_count(&mut self, item_count: usize) {
        self.item_count = item_count;
        self.top_row = self.top_row.min(self.max_top_row());
    }
}

impl ScrollTarget for ListScrollTarget {
    fn page_scroll_up(&mut self) {
        self.top_row = self.top_row.saturating_sub(self.page_size);
        info!(
            "Page up: rows {}..{} of {}",
            self.top_row,
            (self.top_row + self.page_size).min(self.item_count),
            self.item_count
        );
    }

    fn page_scroll_down(&mut self) {
        self.top_row = (self.top_row + self.page_size).min(self.max_top_row());
        info!(
            "Page down: rows {}..{} of {}",
            self.top_row,
            (self.top_row + self.page_size).min(self.item_count),
            self.item_count
        );
    }
}

/// Target that only logs; stands in while no real list view is bound.
#[derive(Debug, Default)]
pub struct TracingTarget;

impl ScrollTarget for TracingTarget {
    fn page_scroll_up(&mut self) {
        debug!("Scroll command received: page up (no view bound)");
    }

    fn page_scroll_down(&mut self) {
        debug!("Scroll command received: page down (no view bound)");
    }
}
