//! This modules defines the common functionality for paging data.

/// The config for pagination
#[derive(Debug, Clone)]
pub struct PaginationConfig {
    /// The page number to default to when not specified in a request.
    pub default_page: u32,
    /// The number of records per page when not specified in a request.
    pub default_page_size: u32,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page: 1,
            default_page_size: 10,
        }
    }
}

/// A validated, 1-indexed page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paging {
    /// The page to fetch, starting at 1.
    pub page: u32,
    /// The maximum number of records on a page, at least 1.
    pub per_page: u32,
}

impl Paging {
    /// Fill in missing values from `config` and clamp both values to at least 1.
    pub fn new(page: Option<u32>, per_page: Option<u32>, config: &PaginationConfig) -> Self {
        Self {
            page: page.unwrap_or(config.default_page).max(1),
            per_page: per_page.unwrap_or(config.default_page_size).max(1),
        }
    }

    /// The number of records to skip before the first record of this page.
    ///
    /// Saturates at `i64::MAX`, which SQLite reads as "past the last row".
    pub fn offset(&self) -> i64 {
        let offset = u64::from(self.page - 1) * u64::from(self.per_page);

        i64::try_from(offset).unwrap_or(i64::MAX)
    }

    /// The maximum number of records on this page.
    pub fn limit(&self) -> i64 {
        i64::from(self.per_page)
    }
}

/// The number of pages needed to show `total` records, `per_page` at a time.
pub fn page_count(total: u32, per_page: u32) -> u32 {
    total.div_ceil(per_page.max(1))
}

/// The previous/next controls shown under a paged table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageNavigation {
    /// The page being displayed.
    pub page: u32,
    /// The number of pages available.
    pub page_count: u32,
}

impl PageNavigation {
    /// The page before the current one, if any.
    pub fn previous(&self) -> Option<u32> {
        (self.page > 1).then(|| self.page - 1)
    }

    /// The page after the current one, if any.
    pub fn next(&self) -> Option<u32> {
        (self.page < self.page_count).then(|| self.page + 1)
    }
}
