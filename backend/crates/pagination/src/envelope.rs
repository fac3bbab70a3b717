//! The `{ data, meta }` envelope returned by paginated listings.

use serde::{Deserialize, Serialize};

use crate::PageRequest;

/// Pagination metadata derived from a request and the matching total.
///
/// `last_page` is `ceil(total / limit)`, so an empty listing reports
/// `last_page == 0` and neither a next nor a previous page unless `page > 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    /// Number of rows matching the listing filter.
    pub total: u64,
    /// The 1-indexed page that was served.
    pub page: u64,
    /// The last page holding rows.
    pub last_page: u64,
    /// Whether `page < last_page`.
    pub has_next_page: bool,
    /// Whether `page > 1`.
    pub has_prev_page: bool,
}

impl PageMeta {
    /// Compute metadata for `request` against `total` matching rows.
    ///
    /// # Examples
    ///
    /// ```
    /// use pagination::{PageMeta, PageRequest};
    ///
    /// let meta = PageMeta::new(PageRequest::new(Some(1), Some(10)), 23);
    /// assert_eq!(meta.last_page, 3);
    /// assert!(meta.has_next_page);
    /// assert!(!meta.has_prev_page);
    /// ```
    #[must_use]
    pub const fn new(request: PageRequest, total: u64) -> Self {
        let page = request.page();
        let last_page = total.div_ceil(request.limit());
        Self {
            total,
            page,
            last_page,
            has_next_page: page < last_page,
            has_prev_page: page > 1,
        }
    }
}

/// A page of rows together with its metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paginated<T> {
    /// Rows inside the requested window.
    pub data: Vec<T>,
    /// Metadata computed against the same snapshot as `data`.
    pub meta: PageMeta,
}

impl<T> Paginated<T> {
    /// Wrap `data` read for `request` against `total` matching rows.
    #[must_use]
    pub const fn new(data: Vec<T>, request: PageRequest, total: u64) -> Self {
        Self {
            data,
            meta: PageMeta::new(request, total),
        }
    }

    /// Convert every row while keeping the metadata untouched.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paginated<U> {
        Paginated {
            data: self.data.into_iter().map(f).collect(),
            meta: self.meta,
        }
    }
}
