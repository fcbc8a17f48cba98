//! Get Application By ID Use Case

use std::sync::Arc;

use crate::domain::gateways::ApplicationRepository;
use crate::domain::models::application::{ApplicationId, LoanApplication};
use crate::shared::errors::UseCaseError;

/// Use case for getting a loan application by ID
pub struct GetApplicationByIdUseCase {
    application_repository: Arc<dyn ApplicationRepository>,
}

impl GetApplicationByIdUseCase {
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
    pub async fn execute(&self, id: &ApplicationId) -> Result<LoanApplication, UseCaseError> {
        tracing::debug!(application_id = %id, "Getting loan application by ID");

        self.application_repository.find_by_id(id).await?.ok_or_else(|| {
            tracing::warn!(application_id = %id, "Loan application not found");
            UseCaseError::NotFound {
                resource: "LoanApplication".to_string(),
                id: id.to_string(),
            }
        })
    }
}
