//! Page arithmetic for listings

use serde::Serialize;

/// A requested page, 1-based
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: usize,
    pub per_page: usize,
}

impl PageRequest {
    #[must_use]
    pub const fn new(page: usize, per_page: usize) -> Self {
        Self { page, per_page }
    }

    /// Rows to skip; pages below 1 count as page 1
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.page.saturating_sub(1).saturating_mul(self.per_page)
    }

    /// Page size used in queries, never zero
    #[must_use]
    pub const fn limit(&self) -> usize {
        if self.per_page == 0 { 1 } else { self.per_page }
    }
}

/// Navigation state for one page of a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub current_page: usize,
    pub total_pages: usize,
    pub has_prev: bool,
    pub has_next: bool,
    pub prev_page: usize,
    pub next_page: usize,
    pub per_page: usize,
}

/// Compute navigation for `page` of a listing with `total` items
///
/// `total_pages` is never below 1. `page` is not clamped, so a page past the
/// end reports `has_next == false` and `prev_page == page - 1`.
#[must_use]
pub const fn paginate(page: usize, total: usize, per_page: usize) -> Pagination {
    let per_page = if per_page == 0 { 1 } else { per_page };
    let total_pages = if total == 0 { 1 } else { total.div_ceil(per_page) };

    Pagination {
        current_page: page,
        total_pages,
        has_prev: page > 1,
        has_next: page < total_pages,
        prev_page: page.saturating_sub(1),
        next_page: page.saturating_add(1),
        per_page,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_middle_page() {
        let p = paginate(2, 250, 100);
        assert_eq!(p.total_pages, 3);
        assert!(p.has_prev && p.has_next);
        assert_eq!((p.prev_page, p.next_page), (1, 3));
    }

    #[test]
    fn test_single_page_and_empty() {
        let p = paginate(1, 0, 50);
        assert_eq!(p.total_pages, 1);
        assert!(!p.has_prev && !p.has_next);

        let p = paginate(1, 50, 50);
        assert_eq!(p.total_pages, 1);
        assert!(!p.has_next);
    }

    #[test]
    fn test_past_the_end_is_not_clamped() {
        let p = paginate(9, 10, 5);
        assert_eq!(p.current_page, 9);
        assert_eq!(p.total_pages, 2);
        assert!(p.has_prev);
        assert!(!p.has_next);
        assert_eq!(p.prev_page, 8);
    }

    #[test]
    fn test_zero_per_page() {
        let p = paginate(1, 3, 0);
        assert_eq!(p.per_page, 1);
        assert_eq!(p.total_pages, 3);
    }

    #[test]
    fn test_huge_page_does_not_overflow() {
        let p = paginate(usize::MAX, 10, 5);
        assert_eq!(p.next_page, usize::MAX);
        assert!(!p.has_next);
        assert_eq!(PageRequest::new(usize::MAX, 100).offset(), usize::MAX);
    }

    #[test]
    fn test_page_request_offset() {
        assert_eq!(PageRequest::new(1, 20).offset(), 0);
        assert_eq!(PageRequest::new(3, 20).offset(), 40);
        assert_eq!(PageRequest::new(0, 20).offset(), 0);
        assert_eq!(PageRequest::new(2, 0).limit(), 1);
    }
}
