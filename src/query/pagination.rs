//! Pagination link building.
//!
//! [`page_items`] decides which entries a paging widget shows (numbered pages,
//! ellipses, previous/next) and [`build_page_link`] turns an entry's target into
//! an href. Neither touches the network.
//!
//! Clamping happens in [`page_items`]: every concrete target it produces lies in
//! `[1, total_pages]`. [`build_page_link`] trusts its target and only falls back
//! to the current URL when there is no target at all.

use super::codec::encode;
use crate::domain::QueryDescriptor;

/// Pages shown on each side of the current page.
const SIBLING_COUNT: i64 = 1;
/// Pages always shown at each end of the range.
const BOUNDARY_COUNT: i64 = 1;

/// One entry of a rendered paging widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    /// Link to the previous page, or to the last page when the current one is
    /// past the end; `None` on the first page.
    Previous(Option<u32>),
    /// A numbered page.
    Page {
        number: u32,
        selected: bool,
    },
    /// Placeholder for skipped pages.
    Ellipsis,
    /// Link to the next page; `None` on the last page.
    Next(Option<u32>),
}

impl PageItem {
    /// Returns the page this entry navigates to, if any.
    #[must_use]
    pub const fn target(self) -> Option<u32> {
        match self {
            Self::Previous(target) | Self::Next(target) => target,
            Self::Page { number, .. } => Some(number),
            Self::Ellipsis => None,
        }
    }
}

/// Builds the href for a paging entry.
///
/// With a target page, the descriptor is moved to that page and encoded over
/// `current_query` so foreign keys survive. Without one (ellipsis, disabled
/// previous/next) the current URL is returned unchanged.
///
/// ```
/// use catalog_browser::query::{build_page_link, decode};
///
/// let current = "q=foo&type=anime&page=1&debug=1";
/// let href = build_page_link("/search", &decode(current), Some(3), current);
/// assert_eq!(href, "/search?q=foo&type=anime&page=3&debug=1");
///
/// assert_eq!(build_page_link("/search", &decode(current), None, current), format!("/search?{current}"));
/// ```
#[must_use]
pub fn build_page_link(
    base_path: &str,
    descriptor: &QueryDescriptor,
    target: Option<u32>,
    current_query: &str,
) -> String {
    match target {
        Some(page) => {
            let query = encode(&descriptor.with_page(page), current_query);
            format!("{base_path}?{query}")
        }
        None => {
            let current = current_query.strip_prefix('?').unwrap_or(current_query);
            if current.is_empty() {
                base_path.to_string()
            } else {
                format!("{base_path}?{current}")
            }
        }
    }
}

/// Computes the entries of a paging widget for `current` out of `total` pages.
///
/// Shows the first and last page, one sibling on each side of the current page,
/// and an ellipsis wherever pages are skipped. A gap of exactly one page is
/// filled with that page instead of an ellipsis.
///
/// ```
/// use catalog_browser::query::{page_items, PageItem};
///
/// let numbers: Vec<Option<u32>> = page_items(5, 10).into_iter().map(PageItem::target).collect();
/// assert_eq!(
///     numbers,
///     vec![Some(4), Some(1), None, Some(4), Some(5), Some(6), None, Some(10), Some(6)]
/// );
/// ```
#[must_use]
pub fn page_items(current: u32, total: u32) -> Vec<PageItem> {
    let count = i64::from(total);
    let page = i64::from(current);

    let start_pages = inclusive_range(1, BOUNDARY_COUNT.min(count));
    let end_pages = inclusive_range((count - BOUNDARY_COUNT + 1).max(BOUNDARY_COUNT + 1), count);

    let siblings_start = (page - SIBLING_COUNT)
        .min(count - BOUNDARY_COUNT - SIBLING_COUNT * 2 - 1)
        .max(BOUNDARY_COUNT + 2);
    let siblings_end = (page + SIBLING_COUNT)
        .max(BOUNDARY_COUNT + SIBLING_COUNT * 2 + 2)
        .min(end_pages.first().map_or(count - 1, |first| first - 2));

    let mut numbers: Vec<Option<i64>> = start_pages.iter().copied().map(Some).collect();

    if siblings_start > BOUNDARY_COUNT + 2 {
        numbers.push(None);
    } else if BOUNDARY_COUNT + 1 < count - BOUNDARY_COUNT {
        numbers.push(Some(BOUNDARY_COUNT + 1));
    }

    numbers.extend(inclusive_range(siblings_start, siblings_end).into_iter().map(Some));

    if siblings_end < count - BOUNDARY_COUNT - 1 {
        numbers.push(None);
    } else if count - BOUNDARY_COUNT > BOUNDARY_COUNT {
        numbers.push(Some(count - BOUNDARY_COUNT));
    }

    numbers.extend(end_pages.into_iter().map(Some));

    let previous = (page > 1 && count >= 1).then(|| to_page((page - 1).min(count)));
    let next = (page >= 1 && page < count).then(|| to_page(page + 1));

    let mut items = Vec::with_capacity(numbers.len() + 2);
    items.push(PageItem::Previous(previous));
    items.extend(numbers.into_iter().map(|number| match number {
        Some(number) => PageItem::Page {
            number: to_page(number),
            selected: number == page,
        },
        None => PageItem::Ellipsis,
    }));
    items.push(PageItem::Next(next));
    items
}

fn inclusive_range(start: i64, end: i64) -> Vec<i64> {
    if end < start {
        Vec::new()
    } else {
        (start..=end).collect()
    }
}

fn to_page(value: i64) -> u32 {
    u32::try_from(value).unwrap_or(1).max(1)
}
