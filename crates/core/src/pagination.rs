//! Pagination arithmetic for catalog listings.
//!
//! Listing code computes metadata twice: once optimistically to derive the
//! row offset before any query runs, and again from the counted total once
//! it is known. The second pass is authoritative; when the data set changed
//! between the two, the counted total wins.

use serde::{Deserialize, Serialize};

/// Bounds applied to client-supplied paging parameters.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PageLimits {
    #[serde(default = "default_per_page")]
    pub default_per_page: u32,
    #[serde(default = "default_max_per_page")]
    pub max_per_page: u32,
    /// Width of the page number window rendered by pager controls.
    #[serde(default = "default_window")]
    pub window: u32,
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            default_per_page: default_per_page(),
            max_per_page: default_max_per_page(),
            window: default_window(),
        }
    }
}

fn default_per_page() -> u32 {
    20
}

fn default_max_per_page() -> u32 {
    100
}

fn default_window() -> u32 {
    10
}

/// Clamp a requested page number to the valid range.
pub fn normalize_page(page: u32) -> u32 {
    page.max(1)
}

/// Clamp a requested page size into `1..=max_per_page`.
///
/// A `max_per_page` of zero acts as one; limits are not required to have
/// passed config validation before use.
pub fn normalize_per_page(per_page: u32, limits: &PageLimits) -> u32 {
    per_page.clamp(1, limits.max_per_page.max(1))
}

/// Row offset for a normalized page and page size.
pub fn offset_for(page: u32, per_page: u32) -> u64 {
    (u64::from(page) - 1) * u64::from(per_page)
}

/// Inclusive run of page numbers for pager controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageWindow {
    pub start: u32,
    pub end: u32,
    /// Pages exist before the window start.
    pub has_more_before: bool,
    /// Pages exist past the window end.
    pub has_more_after: bool,
}

impl PageWindow {
    /// Window of up to `size` page numbers around `current`.
    ///
    /// The window is centered on the current page and shifted, never shrunk,
    /// when it would run past either end of the page range. A current page
    /// beyond the last page centers on the last page instead.
    fn around(current: u32, total_pages: u32, size: u32) -> Self {
        if total_pages == 0 {
            return Self {
                start: 0,
                end: 0,
                has_more_before: false,
                has_more_after: false,
            };
        }

        let size = size.max(1);
        if total_pages <= size {
            return Self {
                start: 1,
                end: total_pages,
                has_more_before: false,
                has_more_after: false,
            };
        }

        let current = current.clamp(1, total_pages);
        let start = current.saturating_sub(size / 2).max(1);
        let end = (start + size - 1).min(total_pages);
        let start = end + 1 - size;

        Self {
            start,
            end,
            has_more_before: start > 1,
            has_more_after: end < total_pages,
        }
    }
}

/// Listing metadata shipped alongside every page of results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub current_page: u32,
    pub per_page: u32,
    pub total_items: u64,
    pub total_pages: u32,
    pub has_next_page: bool,
    pub has_prev_page: bool,
    /// 1-based ordinal of the first item on this page, 0 when the page is empty.
    pub start_item: u64,
    /// 1-based ordinal of the last item on this page, 0 when the page is empty.
    pub end_item: u64,
    pub window: PageWindow,
}

impl PageMeta {
    /// Compute the metadata block for one page of a result set.
    ///
    /// Inputs are normalized first, so callers may pass raw values: page 0
    /// becomes 1 and oversized page sizes are clamped. A page past the end
    /// of the set yields `start_item == end_item == 0` with the rest of the
    /// metadata intact.
    pub fn compute(page: u32, per_page: u32, total_items: u64, limits: &PageLimits) -> Self {
        let current_page = normalize_page(page);
        let per_page = normalize_per_page(per_page, limits);
        // saturates rather than truncating for sets beyond u32::MAX pages
        let total_pages = total_items
            .div_ceil(u64::from(per_page))
            .min(u64::from(u32::MAX)) as u32;

        let first_ordinal = offset_for(current_page, per_page) + 1;
        let (start_item, end_item) = if total_items == 0 || first_ordinal > total_items {
            (0, 0)
        } else {
            (
                first_ordinal,
                (first_ordinal + u64::from(per_page) - 1).min(total_items),
            )
        };

        Self {
            current_page,
            per_page,
            total_items,
            total_pages,
            has_next_page: current_page < total_pages,
            has_prev_page: current_page > 1 && total_pages > 0,
            start_item,
            end_item,
            window: PageWindow::around(current_page, total_pages, limits.window),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_mid_range_page() {
        let meta = PageMeta::compute(2, 10, 95, &PageLimits::default());

        assert_eq!(meta.current_page, 2);
        assert_eq!(meta.per_page, 10);
        assert_eq!(meta.total_items, 95);
        assert_eq!(meta.total_pages, 10);
        assert!(meta.has_next_page);
        assert!(meta.has_prev_page);
        assert_eq!(meta.start_item, 11);
        assert_eq!(meta.end_item, 20);
    }

    #[test]
    fn test_compute_empty_result_set() {
        let meta = PageMeta::compute(1, 10, 0, &PageLimits::default());

        assert_eq!(meta.total_pages, 0);
        assert!(!meta.has_next_page);
        assert!(!meta.has_prev_page);
        assert_eq!(meta.start_item, 0);
        assert_eq!(meta.end_item, 0);
        assert_eq!(meta.window.start, 0);
        assert_eq!(meta.window.end, 0);
    }

    #[test]
    fn test_compute_normalizes_page_zero() {
        let meta = PageMeta::compute(0, 10, 30, &PageLimits::default());
        assert_eq!(meta.current_page, 1);
        assert_eq!(meta.start_item, 1);
    }

    #[test]
    fn test_compute_clamps_oversized_per_page() {
        let meta = PageMeta::compute(1, 500, 50, &PageLimits::default());
        assert_eq!(meta.per_page, 100);
        assert_eq!(meta.total_pages, 1);
    }

    #[test]
    fn test_compute_last_partial_page() {
        let meta = PageMeta::compute(10, 10, 95, &PageLimits::default());

        assert_eq!(meta.start_item, 91);
        assert_eq!(meta.end_item, 95);
        assert!(!meta.has_next_page);
        assert!(meta.has_prev_page);
    }

    #[test]
    fn test_compute_page_beyond_the_end() {
        let meta = PageMeta::compute(12, 10, 95, &PageLimits::default());

        assert_eq!(meta.current_page, 12);
        assert_eq!(meta.total_pages, 10);
        assert_eq!(meta.start_item, 0);
        assert_eq!(meta.end_item, 0);
        assert!(!meta.has_next_page);
        assert!(meta.has_prev_page);
    }

    #[test]
    fn test_compute_exact_multiple() {
        let meta = PageMeta::compute(10, 10, 100, &PageLimits::default());
        assert_eq!(meta.total_pages, 10);
        assert_eq!(meta.start_item, 91);
        assert_eq!(meta.end_item, 100);
        assert!(!meta.has_next_page);
    }

    #[test]
    fn test_total_pages_rounds_up() {
        let limits = PageLimits::default();
        assert_eq!(PageMeta::compute(1, 10, 1, &limits).total_pages, 1);
        assert_eq!(PageMeta::compute(1, 10, 10, &limits).total_pages, 1);
        assert_eq!(PageMeta::compute(1, 10, 11, &limits).total_pages, 2);
    }

    #[test]
    fn test_total_pages_saturates_for_oversized_sets() {
        // page count no longer fits in u32; it pins to the maximum instead
        // of wrapping through the cast
        let meta = PageMeta::compute(1, 1, u64::MAX, &PageLimits::default());

        assert_eq!(meta.total_pages, u32::MAX);
        assert_eq!(meta.start_item, 1);
        assert_eq!(meta.end_item, 1);
        assert!(meta.has_next_page);
    }

    #[test]
    fn test_item_ranges_cover_every_item_exactly_once() {
        let limits = PageLimits::default();
        let total: u64 = 95;
        let per_page = 10;

        let mut covered: u64 = 0;
        let mut expected_start = 1;
        for page in 1..=10 {
            let meta = PageMeta::compute(page, per_page, total, &limits);
            assert_eq!(meta.start_item, expected_start);
            covered += meta.end_item - meta.start_item + 1;
            expected_start = meta.end_item + 1;
        }
        assert_eq!(covered, total);
    }

    #[test]
    fn test_has_next_iff_pages_remain() {
        let limits = PageLimits::default();
        for page in 1..=12 {
            let meta = PageMeta::compute(page, 10, 95, &limits);
            assert_eq!(meta.has_next_page, page < 10, "page {}", page);
        }
    }

    #[test]
    fn test_window_smaller_total_shows_everything() {
        let meta = PageMeta::compute(2, 10, 45, &PageLimits::default());

        assert_eq!(meta.window.start, 1);
        assert_eq!(meta.window.end, 5);
        assert!(!meta.window.has_more_before);
        assert!(!meta.window.has_more_after);
    }

    #[test]
    fn test_window_centers_on_current_page() {
        // 200 items at 10 per page: 20 pages, window of 10 around page 10
        let meta = PageMeta::compute(10, 10, 200, &PageLimits::default());

        assert_eq!(meta.window.start, 5);
        assert_eq!(meta.window.end, 14);
        assert!(meta.window.has_more_before);
        assert!(meta.window.has_more_after);
    }

    #[test]
    fn test_window_clamps_at_the_start() {
        let meta = PageMeta::compute(2, 10, 200, &PageLimits::default());

        assert_eq!(meta.window.start, 1);
        assert_eq!(meta.window.end, 10);
        assert!(!meta.window.has_more_before);
        assert!(meta.window.has_more_after);
    }

    #[test]
    fn test_window_clamps_at_the_end() {
        let meta = PageMeta::compute(19, 10, 200, &PageLimits::default());

        assert_eq!(meta.window.start, 11);
        assert_eq!(meta.window.end, 20);
        assert!(meta.window.has_more_before);
        assert!(!meta.window.has_more_after);
    }

    #[test]
    fn test_window_for_current_page_past_the_end() {
        let meta = PageMeta::compute(25, 10, 200, &PageLimits::default());

        assert_eq!(meta.window.start, 11);
        assert_eq!(meta.window.end, 20);
    }

    #[test]
    fn test_normalize_page() {
        assert_eq!(normalize_page(0), 1);
        assert_eq!(normalize_page(1), 1);
        assert_eq!(normalize_page(7), 7);
    }

    #[test]
    fn test_normalize_per_page() {
        let limits = PageLimits::default();
        assert_eq!(normalize_per_page(0, &limits), 1);
        assert_eq!(normalize_per_page(20, &limits), 20);
        assert_eq!(normalize_per_page(100, &limits), 100);
        assert_eq!(normalize_per_page(101, &limits), 100);
    }

    #[test]
    fn test_normalize_per_page_with_zero_max() {
        // a hand-built PageLimits can carry max_per_page = 0; everything
        // clamps to one instead of panicking on an inverted range
        let limits = PageLimits {
            default_per_page: 20,
            max_per_page: 0,
            window: 10,
        };
        assert_eq!(normalize_per_page(0, &limits), 1);
        assert_eq!(normalize_per_page(5, &limits), 1);

        let meta = PageMeta::compute(1, 10, 30, &limits);
        assert_eq!(meta.per_page, 1);
        assert_eq!(meta.total_pages, 30);
    }

    #[test]
    fn test_offset_for() {
        assert_eq!(offset_for(1, 20), 0);
        assert_eq!(offset_for(2, 20), 20);
        assert_eq!(offset_for(3, 25), 50);
    }

    #[test]
    fn test_limits_deserialize_with_defaults() {
        let limits: PageLimits = toml::from_str("").unwrap();
        assert_eq!(limits.default_per_page, 20);
        assert_eq!(limits.max_per_page, 100);
        assert_eq!(limits.window, 10);

        let limits: PageLimits = toml::from_str("max_per_page = 50").unwrap();
        assert_eq!(limits.default_per_page, 20);
        assert_eq!(limits.max_per_page, 50);
    }
}
