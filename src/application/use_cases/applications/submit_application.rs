//! Submit Application Use Case
//!
//! Stores a lead submitted through the public form.

use std::sync::Arc;

use crate::domain::gateways::ApplicationRepository;
use crate::domain::models::application::{LoanApplication, SubmitApplicationData};
use crate::shared::errors::UseCaseError;

/// Use case for submitting a new loan application
pub struct SubmitApplicationUseCase {
    application_repository: Arc<dyn ApplicationRepository>,
}

impl SubmitApplicationUseCase {
    #[must_use]
    pub fn new(application_repository: Arc<dyn ApplicationRepository>) -> Self {
        Self { application_repository }
    }

    /// Execute the use case
    ///
    /// # Errors
    ///
    /// Returns `UseCaseError::Repository` if the record store rejects the insert
    /// or is unreachable.
    pub async fn execute(&self, data: SubmitApplicationData) -> Result<LoanApplication, UseCaseError> {
        let application = LoanApplication::new(data);
        tracing::info!(application_id = %application.id(), "Submitting loan application");

        let created = self.application_repository.create(&application).await?;

        tracing::info!(
            application_id = %created.id(),
            loan_amount = %created.financial().loan_amount,
            "Loan application stored"
        );
        Ok(created)
    }
}
