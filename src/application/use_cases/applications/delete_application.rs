//! Delete Application Use Case
//!
//! Hard deletes a lead. Bank connection follow-ups are kept and unlinked.

use std::sync::Arc;

use crate::domain::gateways::ApplicationRepository;
use crate::domain::models::application::ApplicationId;
use crate::shared::errors::UseCaseError;

pub struct DeleteApplicationUseCase {
    application_repository: Arc<dyn ApplicationRepository>,
}

impl DeleteApplicationUseCase {
    #[must_use]
    pub fn new(application_repository: Arc<dyn ApplicationRepository>) -> Self {
        Self { application_repository }
    }

    /// Execute the use case
    ///
    /// # Errors
    ///
    /// Returns `UseCaseError::NotFound` if the application doesn't exist.
    /// Returns `UseCaseError::Repository` if there's a database error.
    pub async fn execute(&self, id: &ApplicationId) -> Result<(), UseCaseError> {
        tracing::info!(application_id = %id, "Deleting loan application");

        if !self.application_repository.delete(id).await? {
            tracing::warn!(application_id = %id, "Loan application not found for deletion");
            return Err(UseCaseError::NotFound {
                resource: "LoanApplication".to_string(),
                id: id.to_string(),
            });
        }

        tracing::info!(application_id = %id, "Loan application deleted");
        Ok(())
    }
}
