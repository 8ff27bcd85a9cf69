//! Pagination utilities for hymnal-ui

/// Page size when the request doesn't specify one
pub const DEFAULT_LIMIT: i64 = 10;

/// Largest page size a request may ask for
pub const MAX_LIMIT: i64 = 100;

/// Pagination metadata calculated from total results
#[derive(Debug, Clone, Copy)]
pub struct Pagination {
    /// Current page number (1-indexed)
    pub page: i64,
    /// Effective page size after clamping
    pub limit: i64,
    /// Total number of pages
    pub total_pages: i64,
    /// Offset for SQL LIMIT/OFFSET query
    pub offset: i64,
}

/// Calculate pagination metadata from total results, requested page, and
/// requested page size.
///
/// The limit is clamped to [1, MAX_LIMIT] and the page to [1, total_pages].
pub fn calculate_pagination(total_results: i64, requested_page: i64, requested_limit: i64) -> Pagination {
    let limit = requested_limit.clamp(1, MAX_LIMIT);
    let total_pages = (total_results + limit - 1) / limit;
    let page = requested_page.max(1).min(total_pages.max(1));
    let offset = (page - 1) * limit;

    Pagination {
        page,
        limit,
        total_pages,
        offset,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_normal() {
        let p = calculate_pagination(25, 2, 10);
        assert_eq!(p.page, 2);
        assert_eq!(p.limit, 10);
        assert_eq!(p.total_pages, 3);
        assert_eq!(p.offset, 10);
    }

    #[test]
    fn test_pagination_first_page() {
        let p = calculate_pagination(15, 1, 10);
        assert_eq!(p.page, 1);
        assert_eq!(p.total_pages, 2);
        assert_eq!(p.offset, 0);
    }

    #[test]
    fn test_pagination_out_of_bounds_high() {
        let p = calculate_pagination(15, 99, 10);
        assert_eq!(p.page, 2); // Clamped to last page
        assert_eq!(p.offset, 10);
    }

    #[test]
    fn test_pagination_out_of_bounds_low() {
        let p = calculate_pagination(15, 0, 10);
        assert_eq!(p.page, 1); // Clamped to first page
        assert_eq!(p.offset, 0);
    }

    #[test]
    fn test_pagination_empty() {
        let p = calculate_pagination(0, 1, 10);
        assert_eq!(p.page, 1);
        assert_eq!(p.total_pages, 0);
        assert_eq!(p.offset, 0);
    }

    #[test]
    fn test_limit_clamped_to_max() {
        let p = calculate_pagination(500, 1, 1000);
        assert_eq!(p.limit, MAX_LIMIT);
        assert_eq!(p.total_pages, 5);
    }

    #[test]
    fn test_limit_clamped_to_min() {
        let p = calculate_pagination(3, 2, 0);
        assert_eq!(p.limit, 1);
        assert_eq!(p.page, 2);
        assert_eq!(p.offset, 1);
    }

    #[test]
    fn test_exact_page_boundary() {
        let p = calculate_pagination(20, 2, 10);
        assert_eq!(p.page, 2);
        assert_eq!(p.total_pages, 2);
        assert_eq!(p.offset, 10);
    }
}
