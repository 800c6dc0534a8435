//! Client-side paging over the cached roster.

use std::num::NonZeroUsize;

use shared::domain::UserRecord;

pub const DEFAULT_PAGE_SIZE: NonZeroUsize = match NonZeroUsize::new(6) {
    Some(size) => size,
    None => unreachable!(),
};

/// Page size is fixed for the lifetime of the view; the current page is 1-based and is not
/// clamped when the roster shrinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationState {
    page_size: NonZeroUsize,
    current_page: usize,
}

impl PaginationState {
    pub fn new(page_size: NonZeroUsize) -> Self {
        Self {
            page_size,
            current_page: 1,
        }
    }

    pub fn page_size(&self) -> NonZeroUsize {
        self.page_size
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// No bounds check: callers only offer pages in `1..=total_pages` as targets.
    pub fn set_page(&mut self, page: usize) {
        self.current_page = page;
    }
}

impl Default for PaginationState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageView<'a> {
    pub visible: &'a [UserRecord],
    pub current_page: usize,
    pub total_pages: usize,
}

pub fn total_pages(len: usize, page_size: NonZeroUsize) -> usize {
    len.div_ceil(page_size.get()).max(1)
}

pub fn paginate(
    records: &[UserRecord],
    page_size: NonZeroUsize,
    current_page: usize,
) -> PageView<'_> {
    let size = page_size.get();
    let start = current_page.saturating_sub(1).saturating_mul(size);
    let visible = match records.get(start..) {
        Some(rest) => &rest[..rest.len().min(size)],
        None => &[],
    };
    PageView {
        visible,
        current_page,
        total_pages: total_pages(records.len(), page_size),
    }
}

#[cfg(test)]
#[path = "tests/pagination_tests.rs"]
mod tests;
