//! Check Store Health Use Case

use std::sync::Arc;

use crate::domain::gateways::StoreHealth;
use crate::shared::errors::UseCaseError;

pub struct CheckStoreHealthUseCase {
    store_health: Arc<dyn StoreHealth>,
}

impl CheckStoreHealthUseCase {
    #[must_use]
    pub fn new(store_health: Arc<dyn StoreHealth>) -> Self {
        Self { store_health }
    }

    /// Execute the use case
    ///
    /// # Errors
    ///
    /// Returns `UseCaseError::Repository` if the record store does not answer.
    pub async fn execute(&self) -> Result<(), UseCaseError> {
        self.store_health.ping().await.map_err(|err| {
            tracing::warn!(error = %err, "Record store health check failed");
            UseCaseError::from(err)
        })
    }
}
