//! List Applications Use Case
//!
//! Pages through leads, newest first, optionally filtered by status.

use std::sync::Arc;

use crate::domain::gateways::{ApplicationQuery, ApplicationRepository};
use crate::domain::models::application::LoanApplication;
use crate::domain::models::pagination::Page;
use crate::shared::errors::UseCaseError;

pub struct ListApplicationsUseCase {
    application_repository: Arc<dyn ApplicationRepository>,
}

impl ListApplicationsUseCase {
    #[must_use]
    pub fn new(application_repository: Arc<dyn ApplicationRepository>) -> Self {
        Self { application_repository }
    }

    /// Execute the use case
    ///
    /// # Errors
    ///
    /// Returns `UseCaseError::Repository` if there's a database error.
    pub async fn execute(&self, query: ApplicationQuery) -> Result<Page<LoanApplication>, UseCaseError> {
        tracing::debug!(
            page = query.page.page(),
            limit = query.page.limit(),
            status = ?query.status,
            "Listing loan applications"
        );

        let page = self.application_repository.list(&query).await?;

        tracing::debug!(count = page.items.len(), total = page.total, "Listed loan applications");
        Ok(page)
    }
}
