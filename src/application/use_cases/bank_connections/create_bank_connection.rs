//! Create Bank Connection Use Case
//!
//! Records the bank an approved applicant will use to receive funds.

use std::sync::Arc;

use crate::domain::gateways::BankConnectionRepository;
use crate::domain::models::bank_connection::{BankConnection, CreateBankConnectionData};
use crate::shared::errors::{RepositoryError, UseCaseError};

/// Use case for creating a bank connection follow-up
pub struct CreateBankConnectionUseCase {
    bank_connection_repository: Arc<dyn BankConnectionRepository>,
}

impl CreateBankConnectionUseCase {
    #[must_use]
    pub fn new(bank_connection_repository: Arc<dyn BankConnectionRepository>) -> Self {
        Self {
            bank_connection_repository,
        }
    }

    /// Execute the use case
    ///
    /// # Errors
    ///
    /// Returns `UseCaseError::Conflict` if the linked application already has a follow-up.
    /// Returns `UseCaseError::Validation` if `application_id` names no application.
    /// Returns `UseCaseError::Repository` if there's a database error.
    pub async fn execute(&self, data: CreateBankConnectionData) -> Result<BankConnection, UseCaseError> {
        let connection = BankConnection::new(data);
        tracing::info!(
            bank_connection_id = %connection.id(),
            status = connection.status(),
            "Creating bank connection"
        );

        let created = self
            .bank_connection_repository
            .create(&connection)
            .await
            .map_err(|err| match err {
                RepositoryError::Conflict(_) => {
                    UseCaseError::Conflict("A bank connection already exists for this application".to_string())
                }
                RepositoryError::InvalidReference(_) => {
                    UseCaseError::Validation(vec!["applicationId: No application matches this id".to_string()])
                }
                other => other.into(),
            })?;

        tracing::info!(bank_connection_id = %created.id(), "Bank connection created");
        Ok(created)
    }
}
