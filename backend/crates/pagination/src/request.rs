//! Page requests and the offset windows they resolve to.

/// Page used when the caller omits `page` or supplies an unusable value.
pub const DEFAULT_PAGE: u64 = 1;

/// Limit used when the caller omits `limit` or supplies an unusable value.
pub const DEFAULT_LIMIT: u64 = 10;

/// A clamped, 1-indexed page request.
///
/// ## Invariants
/// - `page >= 1`
/// - `limit >= 1`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u64,
    limit: u64,
}

impl PageRequest {
    /// Build a request from signed inputs, clamping unusable values to the
    /// defaults.
    ///
    /// # Examples
    ///
    /// ```
    /// use pagination::PageRequest;
    ///
    /// let request = PageRequest::new(Some(-4), Some(0));
    /// assert_eq!(request.page(), 1);
    /// assert_eq!(request.limit(), 10);
    /// ```
    #[must_use]
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Self {
        Self {
            page: clamp_or(page, DEFAULT_PAGE),
            limit: clamp_or(limit, DEFAULT_LIMIT),
        }
    }

    /// Build a request from raw query-string values.
    ///
    /// Values that do not parse as integers fall back to the defaults.
    #[must_use]
    pub fn parse(page: Option<&str>, limit: Option<&str>) -> Self {
        Self::new(parse_signed(page), parse_signed(limit))
    }

    /// The 1-indexed page number.
    #[must_use]
    pub const fn page(&self) -> u64 {
        self.page
    }

    /// The maximum number of rows per page.
    #[must_use]
    pub const fn limit(&self) -> u64 {
        self.limit
    }

    /// Resolve the request into an offset window.
    ///
    /// `offset = (page - 1) * limit`, saturating at `u64::MAX`.
    #[must_use]
    pub const fn window(&self) -> PageWindow {
        PageWindow {
            offset: self.page.saturating_sub(1).saturating_mul(self.limit),
            limit: self.limit,
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

fn parse_signed(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|value| value.trim().parse::<i64>().ok())
}

fn clamp_or(value: Option<i64>, fallback: u64) -> u64 {
    value
        .and_then(|candidate| u64::try_from(candidate).ok())
        .filter(|candidate| *candidate >= 1)
        .unwrap_or(fallback)
}

/// Offset/limit pair applied to an ordered query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    offset: u64,
    limit: u64,
}

impl PageWindow {
    /// Number of rows to skip.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        self.offset
    }

    /// Number of rows to take.
    #[must_use]
    pub const fn limit(&self) -> u64 {
        self.limit
    }

    /// Offset as the signed integer SQL drivers expect, saturating at
    /// `i64::MAX`.
    #[must_use]
    pub fn sql_offset(&self) -> i64 {
        i64::try_from(self.offset).unwrap_or(i64::MAX)
    }

    /// Limit as the signed integer SQL drivers expect, saturating at
    /// `i64::MAX`.
    #[must_use]
    pub fn sql_limit(&self) -> i64 {
        i64::try_from(self.limit).unwrap_or(i64::MAX)
    }

    /// Apply the window to an already ordered sequence.
    ///
    /// # Examples
    ///
    /// ```
    /// use pagination::PageRequest;
    ///
    /// let window = PageRequest::new(Some(2), Some(2)).window();
    /// assert_eq!(window.apply(1..=5), vec![3, 4]);
    /// ```
    #[must_use]
    pub fn apply<T>(&self, rows: impl IntoIterator<Item = T>) -> Vec<T> {
        let skip = usize::try_from(self.offset).unwrap_or(usize::MAX);
        let take = usize::try_from(self.limit).unwrap_or(usize::MAX);
        rows.into_iter().skip(skip).take(take).collect()
    }
}
