//! Fixed-size page window over the filtered result list.

use std::ops::Range;

pub const PAGE_SIZE: usize = 15;

/// 1-indexed page cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    page: usize,
    page_size: usize,
}

impl Default for Pager {
    fn default() -> Self {
        Self::new(PAGE_SIZE)
    }
}

impl Pager {
    pub fn new(page_size: usize) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Number of pages for `len` results; zero when there are none.
    pub fn page_count(&self, len: usize) -> usize {
        len.div_ceil(self.page_size)
    }

    /// Index range of the current page, clamped to `len`.
    pub fn window(&self, len: usize) -> Range<usize> {
        page_window(len, self.page, self.page_size)
    }

    pub fn has_next(&self, len: usize) -> bool {
        self.page < self.page_count(len)
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    /// Advance one page. No-op on the last page.
    pub fn next(&mut self, len: usize) -> bool {
        if !self.has_next(len) {
            return false;
        }
        self.page += 1;
        true
    }

    /// Go back one page. No-op on page 1.
    pub fn prev(&mut self) -> bool {
        if !self.has_prev() {
            return false;
        }
        self.page -= 1;
        true
    }

    pub fn reset(&mut self) {
        self.page = 1;
    }
}

/// `[(page-1)*size, page*size)` clamped to `len`. Pages start at 1.
pub fn page_window(len: usize, page: usize, page_size: usize) -> Range<usize> {
    let page_size = page_size.max(1);
    let start = page
        .saturating_sub(1)
        .saturating_mul(page_size)
        .min(len);
    let end = start.saturating_add(page_size).min(len);
    start..end
}
