//! List Bank Connections Use Case

use std::sync::Arc;

use crate::domain::gateways::{BankConnectionQuery, BankConnectionRepository};
use crate::domain::models::bank_connection::BankConnection;
use crate::domain::models::pagination::Page;
use crate::shared::errors::UseCaseError;

pub struct ListBankConnectionsUseCase {
    bank_connection_repository: Arc<dyn BankConnectionRepository>,
}

impl ListBankConnectionsUseCase {
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
    /// Returns `UseCaseError::Repository` if there's a database error.
    pub async fn execute(&self, query: BankConnectionQuery) -> Result<Page<BankConnection>, UseCaseError> {
        tracing::debug!(
            page = query.page.page(),
            limit = query.page.limit(),
            status = ?query.status,
            "Listing bank connections"
        );

        let page = self.bank_connection_repository.list(&query).await?;

        tracing::debug!(count = page.items.len(), total = page.total, "Listed bank connections");
        Ok(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::gateways::bank_connection_repository::MockBankConnectionRepository;
    use crate::domain::models::application::fixtures;
    use crate::domain::models::pagination::PageRequest;

    #[tokio::test]
    async fn should_return_page_from_repository() {
        let mut repo = MockBankConnectionRepository::new();
        repo.expect_list()
            .withf(|q| q.status.as_deref() == Some("approved_pending_bank_setup"))
            .returning(|q| {
                let connection = BankConnection::placeholder_for(&fixtures::application("Ann", "Lee", "5551234567"));
                Ok(Page::new(vec![connection], 1, q.page))
            });

        let use_case = ListBankConnectionsUseCase::new(Arc::new(repo));
        let page = use_case
            .execute(BankConnectionQuery {
                page: PageRequest::default(),
                status: Some("approved_pending_bank_setup".to_string()),
            })
            .await
            .unwrap();

        assert_eq!(page.items.len(), 1);
        assert_eq!(page.total_pages(), 1);
    }
}
