/// One-based page request. Values are taken as given; nothing is clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Pagination {
    pub(crate) page: i64,
    pub(crate) page_size: i64,
}

impl Pagination {
    pub(crate) fn new(page: i64, page_size: i64) -> Self {
        Self { page, page_size }
    }

    pub(crate) fn offset(&self) -> i64 {
        self.page.saturating_sub(1).saturating_mul(self.page_size)
    }

    pub(crate) fn limit(&self) -> i64 {
        self.page_size
    }

    /// Negative offsets and non-positive limits select nothing.
    pub(crate) fn is_empty_window(&self) -> bool {
        self.offset() < 0 || self.limit() <= 0
    }
}

/// A page of items plus the size of the whole filtered set.
#[derive(Debug, Clone)]
pub(crate) struct Page<T> {
    pub(crate) items: Vec<T>,
    pub(crate) total: i64,
}

#[cfg(test)]
mod tests {
    use super::Pagination;

    #[test]
    fn offset_is_page_minus_one_times_size() {
        let pagination = Pagination::new(3, 20);
        assert_eq!(pagination.offset(), 40);
        assert_eq!(pagination.limit(), 20);
        assert!(!pagination.is_empty_window());
    }

    #[test]
    fn non_positive_values_give_empty_window() {
        assert!(Pagination::new(0, 10).is_empty_window());
        assert!(Pagination::new(1, 0).is_empty_window());
        assert!(Pagination::new(2, -5).is_empty_window());
    }
}
