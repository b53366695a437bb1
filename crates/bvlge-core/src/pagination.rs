//! Fixed-size client-side pagination.

/// Transactions shown per page unless configured otherwise
pub const DEFAULT_PAGE_SIZE: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    page_size: usize,
    page: usize,
}

impl Paginator {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            page: 0,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Zero-based current page
    pub fn page(&self) -> usize {
        self.page
    }

    /// Number of pages for `total` items; an empty list still has one page
    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.page_size).max(1)
    }

    /// Items on page `page` (zero-based); empty past the end
    pub fn slice<'a, T>(&self, items: &'a [T], page: usize) -> &'a [T] {
        let start = page.saturating_mul(self.page_size).min(items.len());
        let end = start.saturating_add(self.page_size).min(items.len());
        &items[start..end]
    }

    pub fn current<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        self.slice(items, self.page)
    }

    pub fn next(&mut self, total: usize) {
        if self.page + 1 < self.page_count(total) {
            self.page += 1;
        }
    }

    pub fn prev(&mut self) {
        self.page = self.page.saturating_sub(1);
    }

    pub fn first(&mut self) {
        self.page = 0;
    }

    /// Pull the page back in range after the list shrank or was replaced
    pub fn clamp(&mut self, total: usize) {
        self.page = self.page.min(self.page_count(total) - 1);
    }
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_partial_page() {
        let items: Vec<u32> = (1..=12).collect();
        let pager = Paginator::new(5);
        assert_eq!(pager.page_count(items.len()), 3);
        assert_eq!(pager.slice(&items, 2), &[11, 12]);
        assert_eq!(pager.slice(&items, 0), &[1, 2, 3, 4, 5]);
        assert!(pager.slice(&items, 3).is_empty());
    }

    #[test]
    fn test_navigation_stays_in_range() {
        let mut pager = Paginator::new(5);
        pager.prev();
        assert_eq!(pager.page(), 0);
        pager.next(12);
        pager.next(12);
        pager.next(12);
        assert_eq!(pager.page(), 2);
        pager.clamp(4);
        assert_eq!(pager.page(), 0);
    }

    #[test]
    fn test_empty_list_has_one_page() {
        let pager = Paginator::default();
        let items: Vec<u32> = Vec::new();
        assert_eq!(pager.page_count(0), 1);
        assert!(pager.current(&items).is_empty());
    }

    #[test]
    fn test_zero_page_size_is_bumped() {
        assert_eq!(Paginator::new(0).page_size(), 1);
    }
}
