//! Pagination arithmetic for paginated listings
//!
//! All page numbers are 1-indexed. A page size of zero is a caller error and
//! is rejected eagerly with [`Error::InvalidArgument`]; out-of-range page
//! numbers are not errors and simply yield empty results.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// The 1-indexed span of items shown on one page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRange {
    pub start: i64,
    pub end: i64,
    pub total: i64,
}

impl PageRange {
    /// True when the page lies outside the listing
    pub fn is_empty(&self) -> bool {
        self.start < 1 || self.start > self.end
    }

    /// Number of items covered by this range
    pub fn len(&self) -> u64 {
        if self.is_empty() {
            0
        } else {
            (self.end - self.start + 1).unsigned_abs()
        }
    }
}

impl std::fmt::Display for PageRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Showing {}-{} of {} products", self.start, self.end, self.total)
    }
}

fn check_page_size(items_per_page: u32) -> Result<()> {
    if items_per_page == 0 {
        return Err(Error::invalid("items per page must be positive"));
    }
    Ok(())
}

/// Total number of pages needed to list `total_items`
pub fn total_pages(total_items: u32, items_per_page: u32) -> Result<u32> {
    check_page_size(items_per_page)?;
    Ok(total_items.div_ceil(items_per_page))
}

/// Number of items expected on `page_number`.
///
/// Returns 0 for any page outside `1..=total_pages`, so `-5` and
/// `total_pages + 1` are indistinguishable by value.
pub fn items_on_page(page_number: i64, total_items: u32, items_per_page: u32) -> Result<u32> {
    let pages = total_pages(total_items, items_per_page)?;

    if page_number < 1 || page_number > i64::from(pages) {
        return Ok(0);
    }

    if page_number == i64::from(pages) {
        let remainder = total_items % items_per_page;
        return Ok(if remainder == 0 { items_per_page } else { remainder });
    }

    Ok(items_per_page)
}

/// Range of items shown on `page_number`.
///
/// Page numbers are not bounds checked. Page 0 gives `-15..=0` for 16 per
/// page and a page past the end gives `start > total`; both are
/// [`PageRange::is_empty`].
pub fn page_range(page_number: i64, total_items: u32, items_per_page: u32) -> Result<PageRange> {
    check_page_size(items_per_page)?;

    let per_page = i64::from(items_per_page);
    let total = i64::from(total_items);

    Ok(PageRange {
        start: page_number.saturating_sub(1).saturating_mul(per_page).saturating_add(1),
        end: page_number.saturating_mul(per_page).min(total),
        total,
    })
}
