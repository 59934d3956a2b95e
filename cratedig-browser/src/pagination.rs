//! Pagination utilities
//!
//! Slices result sets into fixed-size pages and builds page-button metadata
//! for renderers: first and last page always shown, a window of
//! [`PAGE_WINDOW`] pages around the current one, gaps collapsed to a single
//! ellipsis.

use serde::Serialize;

/// Page size constant for all pagination
pub const PAGE_SIZE: usize = 10;

/// Pages shown on each side of the current page
pub const PAGE_WINDOW: usize = 2;

/// One page of a result set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page<'a, T> {
    /// Records on this page (empty when the page is past the end)
    pub items: &'a [T],
    /// Total number of pages (1 for an empty result set)
    pub total_pages: usize,
    /// Page number (1-indexed)
    pub current_page: usize,
}

/// Number of pages needed for `len` results; an empty set still has one page
pub fn total_pages(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size.max(1)).max(1)
}

/// Slice `results` to page `page`
///
/// Out-of-range pages are not rejected: they produce an empty `items`
/// slice. Page 0 is treated as page 1.
///
/// # Examples
/// ```
/// use cratedig_browser::pagination::paginate;
///
/// let results: Vec<u32> = (0..25).collect();
/// let p = paginate(&results, 3, 10);
/// assert_eq!(p.items, &[20, 21, 22, 23, 24]);
/// assert_eq!(p.total_pages, 3);
/// ```
pub fn paginate<T>(results: &[T], page: usize, page_size: usize) -> Page<'_, T> {
    let page_size = page_size.max(1);
    let page = page.max(1);
    let start = (page - 1).saturating_mul(page_size);

    let items = if start >= results.len() {
        &results[..0]
    } else {
        let end = start.saturating_add(page_size).min(results.len());
        &results[start..end]
    };

    Page {
        items,
        total_pages: total_pages(results.len(), page_size),
        current_page: page,
    }
}

/// Clamp a requested page into `[1, total_pages]`
///
/// # Examples
/// ```
/// use cratedig_browser::pagination::clamp_page;
///
/// assert_eq!(clamp_page(99, 3), 3);
/// assert_eq!(clamp_page(0, 3), 1);
/// assert_eq!(clamp_page(5, 0), 1);
/// ```
pub fn clamp_page(requested: usize, total_pages: usize) -> usize {
    requested.max(1).min(total_pages.max(1))
}

/// A single page-button slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PageButton {
    Page { number: usize, current: bool },
    Ellipsis,
}

/// Page navigation controls for a renderer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageControls {
    pub current_page: usize,
    pub total_pages: usize,
    pub buttons: Vec<PageButton>,
    /// Disabled (not omitted) on the first page
    pub previous_enabled: bool,
    /// Disabled (not omitted) on the last page
    pub next_enabled: bool,
}

/// Build page buttons around `current`
pub fn page_controls(current: usize, total_pages: usize) -> PageControls {
    let total = total_pages.max(1);
    let current = clamp_page(current, total);

    let mut shown = vec![1, total];
    let low = current.saturating_sub(PAGE_WINDOW).max(1);
    let high = (current + PAGE_WINDOW).min(total);
    shown.extend(low..=high);
    shown.sort_unstable();
    shown.dedup();

    let mut buttons = Vec::with_capacity(shown.len() + 2);
    let mut previous = 0;
    for number in shown {
        if previous != 0 && number > previous + 1 {
            buttons.push(PageButton::Ellipsis);
        }
        buttons.push(PageButton::Page {
            number,
            current: number == current,
        });
        previous = number;
    }

    PageControls {
        current_page: current,
        total_pages: total,
        buttons,
        previous_enabled: current > 1,
        next_enabled: current < total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Compact rendering: page numbers, `*` marks current, `…` for gaps
    fn layout(controls: &PageControls) -> String {
        controls
            .buttons
            .iter()
            .map(|b| match b {
                PageButton::Page { number, current: true } => format!("*{number}"),
                PageButton::Page { number, .. } => number.to_string(),
                PageButton::Ellipsis => "…".to_string(),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn test_paginate_normal() {
        let results: Vec<usize> = (0..25).collect();
        let p = paginate(&results, 2, PAGE_SIZE);
        assert_eq!(p.items, &results[10..20]);
        assert_eq!(p.total_pages, 3);
        assert_eq!(p.current_page, 2);
    }

    #[test]
    fn test_paginate_last_partial_page() {
        let results: Vec<usize> = (0..25).collect();
        let p = paginate(&results, 3, PAGE_SIZE);
        assert_eq!(p.items.len(), 5);
        assert_eq!(p.total_pages, 3);

        let controls = page_controls(p.current_page, p.total_pages);
        assert!(!controls.next_enabled);
        assert!(controls.previous_enabled);
    }

    #[test]
    fn test_paginate_exact_page_boundary() {
        let results: Vec<usize> = (0..20).collect();
        let p = paginate(&results, 2, PAGE_SIZE);
        assert_eq!(p.items.len(), 10);
        assert_eq!(p.total_pages, 2);
    }

    #[test]
    fn test_paginate_out_of_range_is_empty() {
        let results: Vec<usize> = (0..15).collect();
        let p = paginate(&results, 5, PAGE_SIZE);
        assert!(p.items.is_empty());
        assert_eq!(p.total_pages, 2);
        assert_eq!(p.current_page, 5);
    }

    #[test]
    fn test_paginate_empty() {
        let results: Vec<usize> = Vec::new();
        let p = paginate(&results, 1, PAGE_SIZE);
        assert!(p.items.is_empty());
        assert_eq!(p.total_pages, 1);
        assert_eq!(p.current_page, 1);
    }

    #[test]
    fn test_paginate_matches_slice_formula() {
        let results: Vec<usize> = (0..47).collect();
        for page in 1..=6 {
            let p = paginate(&results, page, PAGE_SIZE);
            let start = ((page - 1) * PAGE_SIZE).min(results.len());
            let end = (page * PAGE_SIZE).min(results.len());
            assert_eq!(p.items, &results[start..end]);
            assert!(p.items.len() <= PAGE_SIZE);
        }
    }

    #[test]
    fn test_clamp_page() {
        assert_eq!(clamp_page(2, 3), 2);
        assert_eq!(clamp_page(99, 2), 2);
        assert_eq!(clamp_page(0, 2), 1);
        assert_eq!(clamp_page(1, 0), 1);
    }

    #[test]
    fn test_controls_single_page() {
        let c = page_controls(1, 1);
        assert_eq!(layout(&c), "*1");
        assert!(!c.previous_enabled);
        assert!(!c.next_enabled);
    }

    #[test]
    fn test_controls_middle() {
        assert_eq!(layout(&page_controls(5, 10)), "1 … 3 4 *5 6 7 … 10");
    }

    #[test]
    fn test_controls_near_edges() {
        assert_eq!(layout(&page_controls(1, 10)), "*1 2 3 … 10");
        assert_eq!(layout(&page_controls(4, 10)), "1 2 3 *4 5 6 … 10");
        assert_eq!(layout(&page_controls(10, 10)), "1 … 8 9 *10");
        assert_eq!(layout(&page_controls(2, 5)), "1 *2 3 4 5");
    }

    #[test]
    fn test_controls_contain_required_pages() {
        for total in 1..=15 {
            for current in 1..=total {
                let c = page_controls(current, total);
                let numbers: Vec<usize> = c
                    .buttons
                    .iter()
                    .filter_map(|b| match b {
                        PageButton::Page { number, .. } => Some(*number),
                        PageButton::Ellipsis => None,
                    })
                    .collect();

                assert!(numbers.contains(&1));
                assert!(numbers.contains(&total));
                let low = current.saturating_sub(PAGE_WINDOW).max(1);
                for p in low..=(current + PAGE_WINDOW).min(total) {
                    assert!(numbers.contains(&p));
                }

                // Exactly one ellipsis per gap, never two in a row
                for pair in c.buttons.windows(2) {
                    match pair {
                        [PageButton::Ellipsis, PageButton::Ellipsis] => panic!("double ellipsis"),
                        [PageButton::Page { number: a, .. }, PageButton::Page { number: b, .. }] => {
                            assert_eq!(*b, a + 1)
                        }
                        _ => {}
                    }
                }
            }
        }
    }
}
