//! Offset pagination for list endpoints
//!
//! Query parsing is deliberately lenient: `?page=abc` or `?limit=`
//! silently fall back to defaults instead of rejecting the request, and
//! out-of-range limits clamp to the allowed window. Out-of-range pages
//! return an empty page, never an error.

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: i64 = 20;
pub const MAX_PAGE_SIZE: i64 = 100;

/// Raw page/limit query parameters.
///
/// Kept as strings so malformed values degrade to defaults rather than
/// failing deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl PageQuery {
    /// Effective page number, 1-based. Anything unparseable or below 1
    /// becomes 1.
    pub fn page(&self) -> i64 {
        self.page
            .as_deref()
            .and_then(|v| v.parse::<i64>().ok())
            .filter(|p| *p >= 1)
            .unwrap_or(1)
    }

    /// Effective page size, clamped to [1, MAX_PAGE_SIZE].
    pub fn limit(&self) -> i64 {
        self.limit
            .as_deref()
            .and_then(|v| v.parse::<i64>().ok())
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE)
    }
}

/// Pagination metadata returned alongside list results.
#[derive(Debug, Clone, Serialize)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    /// Total page count; 0 when there are no results
    pub pages: i64,
}

impl Pagination {
    pub fn new(page: i64, limit: i64, total: i64) -> Self {
        let pages = if total == 0 {
            0
        } else {
            (total + limit - 1) / limit
        };
        Self {
            page,
            limit,
            total,
            pages,
        }
    }
}
