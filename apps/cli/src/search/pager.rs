//! Result paging — pure window math over the fetched job collection.
//!
//! Paging is forward-only: rendered cards accumulate, and "load more" appends
//! the next window without touching the cards already on screen. The full
//! collection stays in memory; only rendering is windowed.

use std::ops::Range;

/// Fixed number of job cards revealed per page.
pub const JOBS_PER_PAGE: usize = 10;

/// Half-open index range of the cards belonging to one page.
/// Pages are 1-based; a page past the end yields an empty window.
pub fn page_window(total: usize, page: usize) -> Range<usize> {
    let start = page
        .saturating_sub(1)
        .saturating_mul(JOBS_PER_PAGE)
        .min(total);
    let end = start.saturating_add(JOBS_PER_PAGE).min(total);
    start..end
}

/// Number of cards on screen once pages 1..=`page` have been rendered.
pub fn rendered_count(total: usize, page: usize) -> usize {
    page.saturating_mul(JOBS_PER_PAGE).min(total)
}

/// Whether a "load more" affordance should be offered: true exactly when at
/// least one job exists beyond the rendered window.
pub fn load_more_visible(total: usize, page: usize) -> bool {
    rendered_count(total, page) < total
}
