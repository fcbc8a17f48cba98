//! Bank Connection Repository Gateway

use async_trait::async_trait;

use crate::domain::models::application::ApplicationId;
use crate::domain::models::bank_connection::{BankConnection, BankConnectionId};
use crate::domain::models::pagination::{Page, PageRequest};
use crate::shared::errors::RepositoryError;

/// Filter and paging for bank connection listings; status is free text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BankConnectionQuery {
    pub page: PageRequest,
    pub status: Option<String>,
}

/// Repository trait for BankConnection persistence operations
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BankConnectionRepository: Send + Sync {
    /// Insert a new bank connection.
    ///
    /// Fails with `RepositoryError::Conflict` if one already exists for the
    /// same application.
    async fn create(&self, connection: &BankConnection) -> Result<BankConnection, RepositoryError>;

    /// Page through bank connections, newest `submitted_at` first
    async fn list(&self, query: &BankConnectionQuery) -> Result<Page<BankConnection>, RepositoryError>;

    /// The bank connection linked to an application, if any (at most one)
    async fn find_by_application_id(
        &self,
        application_id: &ApplicationId,
    ) -> Result<Option<BankConnection>, RepositoryError>;

    /// Oldest bank connection recorded for this applicant name and phone
    async fn find_by_applicant(&self, name: &str, phone: &str) -> Result<Option<BankConnection>, RepositoryError>;

    /// Hard delete a bank connection
    async fn delete(&self, id: &BankConnectionId) -> Result<bool, RepositoryError>;
}
