//! Get Application Stats Use Case

use std::sync::Arc;

use crate::domain::gateways::ApplicationRepository;
use crate::domain::models::stats::ApplicationStats;
use crate::shared::errors::UseCaseError;

pub struct GetApplicationStatsUseCase {
    application_repository: Arc<dyn ApplicationRepository>,
}

impl GetApplicationStatsUseCase {
    #[must_use]
    pub fn new(application_repository: Arc<dyn ApplicationRepository>) -> Self {
        Self { application_repository }
    }

    /// Execute the use case
    ///
    /// # Errors
    ///
    /// Returns `UseCaseError::Repository` if there's a database error.
    pub async fn execute(&self) -> Result<ApplicationStats, UseCaseError> {
        let totals = self.application_repository.status_totals().await?;
        let stats = ApplicationStats::from_totals(&totals);

        tracing::debug!(total = stats.total_applications, "Computed application stats");
        Ok(stats)
    }
}
