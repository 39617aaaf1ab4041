//! Pagination requests and results.

use serde::{Deserialize, Serialize};

use crate::error::{PageOutOfRangeError, PostboardError, ValidationError};

/// One-based page selection supplied by a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    pub page_size: u32,
    pub current_page: u32,
}

impl PageRequest {
    /// Build and validate a page request.
    ///
    /// # Errors
    ///
    /// Returns [`PostboardError::Validation`] when either value is zero.
    pub fn new(page_size: u32, current_page: u32) -> Result<Self, PostboardError> {
        let request = Self {
            page_size,
            current_page,
        };
        request.validate()?;
        Ok(request)
    }

    /// Both values must be at least 1.
    ///
    /// # Errors
    ///
    /// Returns [`PostboardError::Validation`] when either value is zero.
    pub fn validate(&self) -> Result<(), PostboardError> {
        if self.page_size == 0 {
            return Err(ValidationError::NotPositive { field: "pageSize" }.into());
        }
        if self.current_page == 0 {
            return Err(ValidationError::NotPositive {
                field: "currentPage",
            }
            .into());
        }
        Ok(())
    }

    /// Number of rows to skip.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.current_page - 1) * u64::from(self.page_size)
    }

    /// Number of rows to take.
    #[must_use]
    pub fn limit(&self) -> u64 {
        u64::from(self.page_size)
    }

    /// Pages remaining after the current one for a collection of `total` rows.
    ///
    /// # Errors
    ///
    /// Returns [`PostboardError::PageOutOfRange`] when the current page lies
    /// beyond the last page. An empty collection has zero pages, so even
    /// page 1 is out of range.
    pub fn pages_left(&self, total: u64, entity: &'static str) -> Result<u64, PostboardError> {
        let total_pages = total.div_ceil(u64::from(self.page_size));
        let current = u64::from(self.current_page);
        if current > total_pages {
            return Err(PageOutOfRangeError {
                entity,
                current_page: self.current_page,
                total_pages,
            }
            .into());
        }
        Ok(total_pages - current)
    }
}

/// One page of results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub pages_left: u64,
    pub result: Vec<T>,
}
