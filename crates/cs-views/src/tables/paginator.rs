//! Client-side pagination over an already-downloaded row list

use std::ops::Range;

/// Current page of a list whose length may change between frames
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paginator {
    page: usize,
    page_size: usize,
}

impl Paginator {
    /// A page size of 0 is treated as 1
    pub fn new(page_size: usize) -> Self {
        Self {
            page: 0,
            page_size: page_size.max(1),
        }
    }

    /// Zero-based page index
    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.page = 0;
    }

    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.page_size)
    }

    /// Index range of the current page, always within `0..total`
    pub fn page_range(&self, total: usize) -> Range<usize> {
        let start = (self.page * self.page_size).min(total);
        let end = (start + self.page_size).min(total);
        start..end
    }

    /// Pull the page back into range after the list shrank
    pub fn clamp(&mut self, total: usize) {
        let last = self.page_count(total).saturating_sub(1);
        if self.page > last {
            self.page = last;
        }
    }

    pub fn has_prev(&self) -> bool {
        self.page > 0
    }

    pub fn has_next(&self, total: usize) -> bool {
        self.page + 1 < self.page_count(total)
    }

    pub fn next(&mut self, total: usize) {
        if self.has_next(total) {
            self.page += 1;
        }
    }

    pub fn prev(&mut self) {
        self.page = self.page.saturating_sub(1);
    }

    pub fn reset(&mut self) {
        self.page = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_ranges() {
        let mut pager = Paginator::new(10);
        assert_eq!(pager.page_count(25), 3);
        assert_eq!(pager.page_range(25), 0..10);

        pager.next(25);
        pager.next(25);
        assert_eq!(pager.page_range(25), 20..25);
        assert!(!pager.has_next(25));

        pager.next(25);
        assert_eq!(pager.page(), 2);
    }

    #[test]
    fn test_empty_list() {
        let mut pager = Paginator::new(10);
        assert_eq!(pager.page_count(0), 0);
        assert_eq!(pager.page_range(0), 0..0);
        pager.clamp(0);
        assert_eq!(pager.page(), 0);
        assert!(!pager.has_next(0));
        assert!(!pager.has_prev());
    }

    #[test]
    fn test_clamp_after_shrink() {
        let mut pager = Paginator::new(5);
        for _ in 0..4 {
            pager.next(100);
        }
        assert_eq!(pager.page(), 4);

        pager.clamp(12);
        assert_eq!(pager.page(), 2);
        assert_eq!(pager.page_range(12), 10..12);
    }

    #[test]
    fn test_zero_page_size() {
        let mut pager = Paginator::new(0);
        assert_eq!(pager.page_size(), 1);
        pager.set_page_size(0);
        assert_eq!(pager.page_size(), 1);
        pager.prev();
        assert_eq!(pager.page(), 0);
    }
}
