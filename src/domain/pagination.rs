// src/domain/pagination.rs
//! Page bounds shared by every listing path.

pub const MIN_PAGE_INDEX: i64 = 1;
pub const MIN_PAGE_SIZE: i64 = 10;
pub const MAX_PAGE_SIZE: i64 = 100;

/// A normalised, 1-based page request.
///
/// Only [`Page::normalize`] constructs one, so `index >= 1` and
/// `10 <= size <= 100` always hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    index: i64,
    size: i64,
}

impl Page {
    pub fn normalize(index: i64, size: i64) -> Self {
        Self {
            index: index.max(MIN_PAGE_INDEX),
            size: size.clamp(MIN_PAGE_SIZE, MAX_PAGE_SIZE),
        }
    }

    pub fn index(&self) -> i64 {
        self.index
    }

    pub fn size(&self) -> i64 {
        self.size
    }

    pub fn offset(&self) -> i64 {
        (self.index - 1).saturating_mul(self.size)
    }

    pub fn total_pages(&self, total: u64) -> u64 {
        let size = self.size.unsigned_abs();
        total.div_ceil(size)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::normalize(MIN_PAGE_INDEX, MIN_PAGE_SIZE)
    }
}
