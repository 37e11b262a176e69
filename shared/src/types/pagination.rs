//! Pagination related types for list endpoints

use serde::{Deserialize, Serialize};

/// Smallest page size a caller may request
pub const MIN_LIMIT: u32 = 1;
/// Largest page size a caller may request
pub const MAX_LIMIT: u32 = 100;

/// Pagination parameters for list endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Current page number (1-indexed)
    #[serde(default = "default_page")]
    pub page: u32,

    /// Number of items per page
    #[serde(default = "default_limit")]
    pub limit: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: default_page(),
            limit: default_limit(),
        }
    }
}

impl Pagination {
    /// Create a new pagination, clamping out-of-range values
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: page.max(1),
            limit: limit.clamp(MIN_LIMIT, MAX_LIMIT),
        }
    }

    /// Validate and sanitize pagination parameters
    pub fn validate(self) -> Self {
        Self::new(self.page, self.limit)
    }

    /// Calculate the offset for database queries. Widened to u64 so the
    /// largest page number times the largest limit still fits.
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.limit)
    }

    pub fn offset_i64(&self) -> i64 {
        self.offset() as i64
    }

    pub fn limit_i64(&self) -> i64 {
        self.limit as i64
    }
}

/// Paginated response wrapper with metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    /// The actual data items
    pub data: Vec<T>,

    /// Current page number
    pub page: u32,

    /// Items per page
    pub limit: u32,

    /// Total number of items
    pub total: u64,

    /// Total number of pages
    pub total_pages: u32,
}

impl<T> PaginatedResponse<T> {
    /// Create a new paginated response
    pub fn new(data: Vec<T>, pagination: Pagination, total: u64) -> Self {
        Self {
            data,
            page: pagination.page,
            limit: pagination.limit,
            total,
            total_pages: Self::calculate_total_pages(total, pagination.limit),
        }
    }

    /// Map items to a different type, keeping the metadata
    pub fn map<U, F>(self, f: F) -> PaginatedResponse<U>
    where
        F: FnMut(T) -> U,
    {
        PaginatedResponse {
            data: self.data.into_iter().map(f).collect(),
            page: self.page,
            limit: self.limit,
            total: self.total,
            total_pages: self.total_pages,
        }
    }

    fn calculate_total_pages(total: u64, limit: u32) -> u32 {
        if limit == 0 {
            return 0;
        }
        total.div_ceil(limit as u64) as u32
    }
}

fn default_page() -> u32 {
    1
}

fn default_limit() -> u32 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_clamps() {
        let p = Pagination::new(0, 1000);
        assert_eq!(p.page, 1);
        assert_eq!(p.limit, MAX_LIMIT);

        let p = Pagination { page: 3, limit: 0 }.validate();
        assert_eq!(p.limit, MIN_LIMIT);
    }

    #[test]
    fn test_offset() {
        assert_eq!(Pagination::new(1, 10).offset(), 0);
        assert_eq!(Pagination::new(3, 10).offset(), 20);
    }

    #[test]
    fn test_offset_does_not_overflow_on_last_page() {
        let p = Pagination::new(u32::MAX, MAX_LIMIT);
        assert_eq!(p.offset(), (u32::MAX as u64 - 1) * MAX_LIMIT as u64);
        assert!(p.offset_i64() > 0);
    }

    #[test]
    fn test_total_pages() {
        let response = PaginatedResponse::new(vec![1, 2, 3], Pagination::new(1, 3), 7);
        assert_eq!(response.total_pages, 3);

        let empty: PaginatedResponse<u8> = PaginatedResponse::new(vec![], Pagination::default(), 0);
        assert_eq!(empty.total_pages, 0);
    }
}
