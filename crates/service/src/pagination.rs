//! Pagination utilities for service layer
//!
//! Turns a requested page/page size and a total count into a bounded page
//! descriptor, and wraps query results into a serializable [`Page`].

use serde::{Deserialize, Serialize};

/// Pagination parameters as they arrive from a caller. Both are optional.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
pub struct PageRequest {
    /// 1-based page index
    #[serde(default)]
    pub page: Option<u64>,
    /// items per page
    #[serde(default, alias = "per_page")]
    pub page_size: Option<u64>,
}

/// Bounds applied to caller-supplied page sizes.
#[derive(Clone, Copy, Debug)]
pub struct PageLimits {
    pub default_page_size: u64,
    pub max_page_size: u64,
}

impl Default for PageLimits {
    fn default() -> Self { Self { default_page_size: 20, max_page_size: 100 } }
}

impl From<configs::PaginationConfig> for PageLimits {
    fn from(c: configs::PaginationConfig) -> Self {
        Self { default_page_size: c.default_page_size, max_page_size: c.max_page_size }
    }
}

/// Normalized page descriptor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pages {
    pub page: u64,
    pub page_size: u64,
    pub page_count: u64,
    pub total_count: u64,
}

impl Pages {
    pub fn new(req: PageRequest, total_count: u64, limits: PageLimits) -> Self {
        let page_size = match req.page_size {
            None | Some(0) => limits.default_page_size,
            Some(n) => n.min(limits.max_page_size),
        }
        .max(1);
        let page_count = total_count.div_ceil(page_size);
        let page = req.page.unwrap_or(1).clamp(1, page_count.max(1));
        Self { page, page_size, page_count, total_count }
    }

    pub fn offset(&self) -> u64 { (self.page - 1) * self.page_size }

    pub fn limit(&self) -> u64 { self.page_size }

    pub fn into_page<T>(self, items: Vec<T>) -> Page<T> {
        Page {
            page: self.page,
            page_size: self.page_size,
            page_count: self.page_count,
            total_count: self.total_count,
            items,
        }
    }
}

/// One page of results together with its descriptor.
#[derive(Clone, Debug, Serialize)]
pub struct Page<T> {
    pub page: u64,
    pub page_size: u64,
    pub page_count: u64,
    pub total_count: u64,
    pub items: Vec<T>,
}
