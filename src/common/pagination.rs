// src/common/pagination.rs
//! Pagination envelope shared by the list endpoints.
//!
//! Responses carry a `meta` block (`page`, `pageSize`, `pages`, `total`) next to
//! the `result` page, and pages are 1-based.

use serde::{Deserialize, Serialize};

/// Query-string pagination parameters with sane clamping.
#[derive(Deserialize, Debug, Clone, Copy)]
pub struct PageParams {
    pub page: Option<u32>,
    #[serde(alias = "pageSize")]
    pub page_size: Option<u32>,
}

impl PageParams {
    /// Resolved (page, page_size, offset) with defaults page=1, page_size=10.
    pub fn resolve(&self) -> (u32, u32, i64) {
        let page = self.page.unwrap_or(1).max(1);
        let page_size = self.page_size.unwrap_or(10).clamp(1, 100);
        // Widen before multiplying; page comes straight off the query string.
        let offset = (page as i64 - 1) * page_size as i64;
        (page, page_size, offset)
    }
}

#[derive(Serialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub page: u32,
    pub page_size: u32,
    pub pages: u32,
    pub total: i64,
}

impl PaginationMeta {
    pub fn new(page: u32, page_size: u32, total: i64) -> Self {
        let pages = if total == 0 {
            0
        } else {
            ((total + page_size as i64 - 1) / page_size as i64) as u32
        };
        Self {
            page,
            page_size,
            pages,
            total,
        }
    }
}

#[derive(Serialize, Debug)]
pub struct PaginatedResponse<T> {
    pub meta: PaginationMeta,
    pub result: Vec<T>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_params_defaults_and_clamping() {
        let params = PageParams {
            page: None,
            page_size: None,
        };
        assert_eq!(params.resolve(), (1, 10, 0));

        let params = PageParams {
            page: Some(0),
            page_size: Some(500),
        };
        let (page, size, offset) = params.resolve();
        assert_eq!(page, 1);
        assert_eq!(size, 100);
        assert_eq!(offset, 0);

        let params = PageParams {
            page: Some(3),
            page_size: Some(20),
        };
        assert_eq!(params.resolve().2, 40);
    }

    #[test]
    fn test_offset_does_not_overflow_at_max_page() {
        let params = PageParams {
            page: Some(u32::MAX),
            page_size: Some(100),
        };
        let (page, size, offset) = params.resolve();
        assert_eq!(page, u32::MAX);
        assert_eq!(size, 100);
        assert_eq!(offset, (u32::MAX as i64 - 1) * 100);
    }

    #[test]
    fn test_meta_page_count_rounds_up() {
        assert_eq!(PaginationMeta::new(1, 10, 0).pages, 0);
        assert_eq!(PaginationMeta::new(1, 10, 10).pages, 1);
        assert_eq!(PaginationMeta::new(1, 10, 11).pages, 2);
        assert_eq!(PaginationMeta::new(2, 10, 45).total, 45);
    }
}
