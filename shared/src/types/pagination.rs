//! Pagination related types for list endpoints

use serde::{Deserialize, Serialize};

/// Smallest accepted page size
pub const MIN_LIMIT: u32 = 1;

/// Largest accepted page size
pub const MAX_LIMIT: u32 = 100;

fn default_page() -> u32 {
    1
}

fn default_limit() -> u32 {
    10
}

/// Pagination parameters for list endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
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

    /// Calculate the offset for database queries
    pub fn offset(&self) -> u32 {
        (self.page.saturating_sub(1)) * self.limit
    }

    /// Calculate offset as i64 for SQL queries
    pub fn offset_i64(&self) -> i64 {
        self.offset() as i64
    }

    /// Calculate limit as i64 for SQL queries
    pub fn limit_i64(&self) -> i64 {
        self.limit as i64
    }
}

/// Pagination block included in list responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageMeta {
    /// Page that was returned (1-indexed)
    pub page: u32,

    /// Requested page size
    pub limit: u32,

    /// Total number of matching items
    pub total: u64,
}

impl PageMeta {
    /// Build the response block for a query and its total count
    pub fn new(pagination: &Pagination, total: u64) -> Self {
        Self {
            page: pagination.page,
            limit: pagination.limit,
            total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_is_zero_based() {
        assert_eq!(Pagination::new(1, 10).offset(), 0);
        assert_eq!(Pagination::new(3, 10).offset(), 20);
    }

    #[test]
    fn new_clamps_page_and_limit() {
        let p = Pagination::new(0, 1000);
        assert_eq!(p.page, 1);
        assert_eq!(p.limit, MAX_LIMIT);
    }

    #[test]
    fn page_meta_mirrors_query() {
        let meta = PageMeta::new(&Pagination::new(2, 25), 51);
        assert_eq!(meta.page, 2);
        assert_eq!(meta.limit, 25);
        assert_eq!(meta.total, 51);
    }
}
