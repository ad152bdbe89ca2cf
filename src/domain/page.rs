use serde::Serialize;
use std::ops::Range;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;

/// A requested pagination window. Neither field is validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
}

/// One window of a collection plus the collection's full size.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub total: usize,
    pub page: i64,
    pub limit: i64,
    pub items: Vec<T>,
}

impl Pagination {
    pub fn new(page: i64, limit: i64) -> Self {
        Self { page, limit }
    }

    /// Index range selected from a collection of `len` items.
    ///
    /// The window is `[(page-1)*limit, (page-1)*limit + limit)`. Negative
    /// bounds count back from the end, bounds past the end clamp to `len`, and
    /// a start at or past the end yields an empty range.
    pub fn window(&self, len: usize) -> Range<usize> {
        let len = i64::try_from(len).unwrap_or(i64::MAX);
        let start = self.page.saturating_sub(1).saturating_mul(self.limit);
        let end = start.saturating_add(self.limit);

        let start = clamp_index(start, len);
        let end = clamp_index(end, len);
        if start < end {
            start as usize..end as usize
        } else {
            0..0
        }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE, DEFAULT_LIMIT)
    }
}

fn clamp_index(index: i64, len: i64) -> i64 {
    if index < 0 {
        (index + len).max(0)
    } else {
        index.min(len)
    }
}
