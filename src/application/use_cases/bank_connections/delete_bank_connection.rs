//! Delete Bank Connection Use Case

use std::sync::Arc;

use crate::domain::gateways::BankConnectionRepository;
use crate::domain::models::bank_connection::BankConnectionId;
use crate::shared::errors::UseCaseError;

pub struct DeleteBankConnectionUseCase {
    bank_connection_repository: Arc<dyn BankConnectionRepository>,
}

impl DeleteBankConnectionUseCase {
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
    /// Returns `UseCaseError::NotFound` if the bank connection doesn't exist.
    /// Returns `UseCaseError::Repository` if there's a database error.
    pub async fn execute(&self, id: &BankConnectionId) -> Result<(), UseCaseError> {
        tracing::info!(bank_connection_id = %id, "Deleting bank connection");

        if !self.bank_connection_repository.delete(id).await? {
            return Err(UseCaseError::NotFound {
                resource: "BankConnection".to_string(),
                id: id.to_string(),
            });
        }

        tracing::info!(bank_connection_id = %id, "Bank connection deleted");
        Ok(())
    }
}
