//! Pagination types for list endpoints.

use serde::Deserialize;

use crate::config::{DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

/// Pagination query parameters, shared by all list endpoints.
///
/// Contract: `skip = (page - 1) * size`, `limit = size`.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PageRequest {
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_size")]
    pub size: u64,
}

fn default_page() -> u64 {
    DEFAULT_PAGE_NUMBER
}

fn default_size() -> u64 {
    DEFAULT_PAGE_SIZE
}

impl PageRequest {
    pub fn new(page: u64, size: u64) -> Self {
        Self { page, size }
    }

    /// Number of records to skip before the requested page.
    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1) * self.limit()
    }

    /// Page size capped at the maximum.
    pub fn limit(&self) -> u64 {
        self.size.clamp(1, MAX_PAGE_SIZE)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE_NUMBER,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_follows_contract() {
        let page = PageRequest::new(2, 5);
        assert_eq!(page.offset(), 5);
        assert_eq!(page.limit(), 5);
    }

    #[test]
    fn first_page_has_no_offset() {
        let page = PageRequest::new(1, 20);
        assert_eq!(page.offset(), 0);
    }

    #[test]
    fn page_zero_is_treated_as_first() {
        let page = PageRequest::new(0, 10);
        assert_eq!(page.offset(), 0);
    }

    #[test]
    fn size_is_capped() {
        let page = PageRequest::new(1, 10_000);
        assert_eq!(page.limit(), MAX_PAGE_SIZE);
    }
}
