//! Application Repository Gateway
//!
//! Abstract trait defining the contract for loan application persistence.

use async_trait::async_trait;

use crate::domain::models::application::{ApplicationId, ApplicationStatus, LoanApplication};
use crate::domain::models::pagination::{Page, PageRequest};
use crate::domain::models::stats::StatusTotal;
use crate::shared::errors::RepositoryError;

/// Filter and paging for application listings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplicationQuery {
    pub page: PageRequest,
    pub status: Option<ApplicationStatus>,
}

/// Repository trait for LoanApplication persistence operations
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    /// Insert a new application and return the stored record
    async fn create(&self, application: &LoanApplication) -> Result<LoanApplication, RepositoryError>;

    /// Page through applications, newest `submitted_at` first
    async fn list(&self, query: &ApplicationQuery) -> Result<Page<LoanApplication>, RepositoryError>;

    /// Find an application by its ID
    async fn find_by_id(&self, id: &ApplicationId) -> Result<Option<LoanApplication>, RepositoryError>;

    /// Set status and `updated_at`.
    ///
    /// Returns `false` when the id is absent or the status already has that value.
    async fn update_status(&self, id: &ApplicationId, status: ApplicationStatus) -> Result<bool, RepositoryError>;

    /// Hard delete an application
    async fn delete(&self, id: &ApplicationId) -> Result<bool, RepositoryError>;

    /// Count and summed loan amount per status, in one consistent read
    async fn status_totals(&self) -> Result<Vec<StatusTotal>, RepositoryError>;
}
