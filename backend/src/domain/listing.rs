//! Windowed listing results.

use pagination::{PageRequest, Paginated};

/// Rows inside one offset window and the total matching rows, both read
/// from the same snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowedRows<T> {
    pub rows: Vec<T>,
    pub total: u64,
}

impl<T> WindowedRows<T> {
    pub fn new(rows: Vec<T>, total: u64) -> Self {
        Self { rows, total }
    }

    /// Wrap the rows in the paginated envelope for `request`.
    ///
    /// # Examples
    /// ```
    /// use blog_backend::domain::WindowedRows;
    /// use pagination::PageRequest;
    ///
    /// let page = WindowedRows::new(Vec::<u8>::new(), 23)
    ///     .into_paginated(PageRequest::new(Some(4), Some(10)));
    /// assert!(page.data.is_empty());
    /// assert_eq!(page.meta.total, 23);
    /// assert_eq!(page.meta.last_page, 3);
    /// ```
    pub fn into_paginated(self, request: PageRequest) -> Paginated<T> {
        Paginated::new(self.rows, request, self.total)
    }
}
