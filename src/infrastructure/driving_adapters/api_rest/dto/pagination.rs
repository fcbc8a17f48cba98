//! Listing query parameters

use serde::Deserialize;

use crate::domain::models::pagination::PageRequest;
use crate::shared::errors::DomainError;

/// `?page=&limit=&status=`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQueryDto {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub status: Option<String>,
}

impl ListQueryDto {
    /// # Errors
    ///
    /// Returns `DomainError::InvalidValue` when page or limit is out of range.
    pub fn page_request(&self) -> Result<PageRequest, DomainError> {
        PageRequest::new(self.page, self.limit)
    }

    /// Status filter with blank values treated as absent
    #[must_use]
    pub fn status_filter(&self) -> Option<&str> {
        self.status.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}
