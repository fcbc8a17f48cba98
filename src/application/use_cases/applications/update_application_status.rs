//! Update Application Status Use Case
//!
//! Sets a lead's status. Approving a lead also ensures exactly one bank
//! connection follow-up exists for the applicant; if that step fails the
//! status change is rolled back.

use std::sync::Arc;

use crate::domain::gateways::{ApplicationRepository, BankConnectionRepository};
use crate::domain::models::application::{ApplicationId, ApplicationStatus, LoanApplication};
use crate::domain::models::bank_connection::BankConnection;
use crate::shared::errors::{RepositoryError, UseCaseError};

/// Outcome of a status update
#[derive(Debug, Clone)]
pub struct StatusChange {
    pub application: LoanApplication,
    pub previous_status: ApplicationStatus,
    /// Whether the stored status actually changed
    pub changed: bool,
    /// Follow-up attached to an approved lead
    pub bank_connection: Option<BankConnection>,
    pub bank_connection_created: bool,
}

pub struct UpdateApplicationStatusUseCase {
    application_repository: Arc<dyn ApplicationRepository>,
    bank_connection_repository: Arc<dyn BankConnectionRepository>,
}

impl UpdateApplicationStatusUseCase {
    #[must_use]
    pub fn new(
        application_repository: Arc<dyn ApplicationRepository>,
        bank_connection_repository: Arc<dyn BankConnectionRepository>,
    ) -> Self {
        Self {
            application_repository,
            bank_connection_repository,
        }
    }

    /// Execute the use case
    ///
    /// # Errors
    ///
    /// Returns `UseCaseError::NotFound` if the application doesn't exist; nothing is written.
    /// Returns `UseCaseError::Repository` if a write fails. When the follow-up
    /// cannot be created, the previous status is restored before returning.
    pub async fn execute(&self, id: &ApplicationId, status: ApplicationStatus) -> Result<StatusChange, UseCaseError> {
        tracing::info!(application_id = %id, status = %status, "Updating loan application status");

        let existing = self.application_repository.find_by_id(id).await?.ok_or_else(|| {
            tracing::warn!(application_id = %id, "Loan application not found for status update");
            UseCaseError::NotFound {
                resource: "LoanApplication".to_string(),
                id: id.to_string(),
            }
        })?;
        let previous_status = existing.status();

        let changed = self.application_repository.update_status(id, status).await?;

        let (bank_connection, bank_connection_created) = if status == ApplicationStatus::Approved {
            match self.ensure_bank_connection(&existing).await {
                Ok((connection, created)) => (Some(connection), created),
                Err(err) => {
                    if changed {
                        self.compensate(id, previous_status).await;
                    }
                    return Err(err.into());
                }
            }
        } else {
            (None, false)
        };

        tracing::info!(
            application_id = %id,
            previous_status = %previous_status,
            status = %status,
            changed,
            bank_connection_created,
            "Loan application status updated"
        );

        // Pick up the stored `updated_at`; the row may have vanished since
        let application = if changed {
            self.application_repository
                .find_by_id(id)
                .await?
                .unwrap_or_else(|| existing.with_status(status))
        } else {
            existing
        };

        Ok(StatusChange {
            application,
            previous_status,
            changed,
            bank_connection,
            bank_connection_created,
        })
    }

    /// Reuse the follow-up linked to this application, then one recorded for the
    /// same applicant (first write wins); otherwise insert a placeholder
    async fn ensure_bank_connection(
        &self,
        application: &LoanApplication,
    ) -> Result<(BankConnection, bool), RepositoryError> {
        if let Some(existing) = self.find_existing(application).await? {
            tracing::debug!(
                application_id = %application.id(),
                bank_connection_id = %existing.id(),
                "Bank connection already exists for applicant"
            );
            return Ok((existing, false));
        }

        let placeholder = BankConnection::placeholder_for(application);
        match self.bank_connection_repository.create(&placeholder).await {
            Ok(created) => {
                tracing::info!(
                    application_id = %application.id(),
                    bank_connection_id = %created.id(),
                    "Bank connection placeholder created"
                );
                Ok((created, true))
            }
            // A concurrent insert linked the application first
            Err(RepositoryError::Conflict(constraint)) => self
                .find_existing(application)
                .await?
                .map(|existing| (existing, false))
                .ok_or(RepositoryError::Conflict(constraint)),
            Err(err) => Err(err),
        }
    }

    async fn find_existing(&self, application: &LoanApplication) -> Result<Option<BankConnection>, RepositoryError> {
        if let Some(linked) = self
            .bank_connection_repository
            .find_by_application_id(application.id())
            .await?
        {
            return Ok(Some(linked));
        }

        let name = application.applicant().full_name();
        self.bank_connection_repository
            .find_by_applicant(&name, &application.applicant().phone)
            .await
    }

    async fn compensate(&self, id: &ApplicationId, previous_status: ApplicationStatus) {
        match self.application_repository.update_status(id, previous_status).await {
            Ok(_) => tracing::warn!(
                application_id = %id,
                restored_status = %previous_status,
                "Bank connection creation failed; status change rolled back"
            ),
            Err(err) => tracing::error!(
                application_id = %id,
                restored_status = %previous_status,
                error = %err,
                "Bank connection creation failed and status rollback failed"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::gateways::application_repository::MockApplicationRepository;
    use crate::domain::gateways::bank_connection_repository::MockBankConnectionRepository;
    use crate::domain::models::application::fixtures;
    use crate::domain::models::bank_connection::APPROVAL_PLACEHOLDER_STATUS;
    use mockall::predicate::eq;
    use mockall::Sequence;

    /// Repository whose first read returns `application` and later reads the stored `after` status
    fn repo_with(application: &LoanApplication, after: ApplicationStatus) -> MockApplicationRepository {
        let stored = application.clone();
        let mut reads = 0;
        let mut repo = MockApplicationRepository::new();
        repo.expect_find_by_id().returning(move |_| {
            reads += 1;
            if reads == 1 {
                Ok(Some(stored.clone()))
            } else {
                Ok(Some(stored.clone().with_status(after)))
            }
        });
        repo
    }

    fn no_linked_connection(banks: &mut MockBankConnectionRepository) {
        banks.expect_find_by_application_id().returning(|_| Ok(None));
    }

    #[tokio::test]
    async fn should_return_not_found_without_side_effects() {
        let mut apps = MockApplicationRepository::new();
        apps.expect_find_by_id().returning(|_| Ok(None));
        apps.expect_update_status().never();
        let mut banks = MockBankConnectionRepository::new();
        banks.expect_create().never();

        let use_case = UpdateApplicationStatusUseCase::new(Arc::new(apps), Arc::new(banks));
        let result = use_case.execute(&ApplicationId::new(), ApplicationStatus::Approved).await;

        assert!(matches!(result.unwrap_err(), UseCaseError::NotFound { .. }));
    }

    #[tokio::test]
    async fn should_update_status_without_follow_up_when_not_approving() {
        let application = fixtures::application("Ann", "Lee", "5551234567");
        let mut apps = repo_with(&application, ApplicationStatus::Rejected);
        apps.expect_update_status()
            .with(eq(*application.id()), eq(ApplicationStatus::Rejected))
            .times(1)
            .returning(|_, _| Ok(true));
        let mut banks = MockBankConnectionRepository::new();
        banks.expect_find_by_application_id().never();
        banks.expect_find_by_applicant().never();
        banks.expect_create().never();

        let use_case = UpdateApplicationStatusUseCase::new(Arc::new(apps), Arc::new(banks));
        let change = use_case
            .execute(application.id(), ApplicationStatus::Rejected)
            .await
            .unwrap();

        assert!(change.changed);
        assert_eq!(change.previous_status, ApplicationStatus::New);
        assert_eq!(change.application.status(), ApplicationStatus::Rejected);
        assert!(change.bank_connection.is_none());
    }

    #[tokio::test]
    async fn should_return_the_stored_row_after_a_change() {
        let application = fixtures::application("Ann", "Lee", "5551234567");
        let mut apps = repo_with(&application, ApplicationStatus::Pending);
        apps.expect_update_status().returning(|_, _| Ok(true));

        let use_case = UpdateApplicationStatusUseCase::new(Arc::new(apps), Arc::new(MockBankConnectionRepository::new()));
        let change = use_case
            .execute(application.id(), ApplicationStatus::Pending)
            .await
            .unwrap();

        assert_eq!(change.application.status(), ApplicationStatus::Pending);
        assert!(change.application.updated_at() >= application.updated_at());
    }

    #[tokio::test]
    async fn should_create_placeholder_when_approving() {
        let application = fixtures::application("Ann", "Lee", "5551234567");
        let mut apps = repo_with(&application, ApplicationStatus::Approved);
        apps.expect_update_status().times(1).returning(|_, _| Ok(true));
        let mut banks = MockBankConnectionRepository::new();
        banks
            .expect_find_by_application_id()
            .with(eq(*application.id()))
            .returning(|_| Ok(None));
        banks
            .expect_find_by_applicant()
            .with(eq("Ann Lee"), eq("5551234567"))
            .returning(|_, _| Ok(None));
        banks
            .expect_create()
            .withf(|c| c.status() == APPROVAL_PLACEHOLDER_STATUS)
            .times(1)
            .returning(|c| Ok(c.clone()));

        let use_case = UpdateApplicationStatusUseCase::new(Arc::new(apps), Arc::new(banks));
        let change = use_case
            .execute(application.id(), ApplicationStatus::Approved)
            .await
            .unwrap();

        assert!(change.bank_connection_created);
        assert_eq!(change.application.status(), ApplicationStatus::Approved);
        let connection = change.bank_connection.unwrap();
        assert_eq!(connection.application_id(), Some(application.id()));
    }

    #[tokio::test]
    async fn should_reuse_follow_up_linked_under_a_different_name() {
        let application = fixtures::application("Ann", "Lee", "5551234567");
        let linked = BankConnection::placeholder_for(&fixtures::application("ann", "lee", "5550000000"));
        let linked_id = *linked.id();
        let mut apps = repo_with(&application, ApplicationStatus::Approved);
        apps.expect_update_status().times(1).returning(|_, _| Ok(true));
        let mut banks = MockBankConnectionRepository::new();
        banks
            .expect_find_by_application_id()
            .returning(move |_| Ok(Some(linked.clone())));
        banks.expect_find_by_applicant().never();
        banks.expect_create().never();

        let use_case = UpdateApplicationStatusUseCase::new(Arc::new(apps), Arc::new(banks));
        let change = use_case
            .execute(application.id(), ApplicationStatus::Approved)
            .await
            .unwrap();

        assert!(!change.bank_connection_created);
        assert_eq!(change.bank_connection.unwrap().id(), &linked_id);
    }

    #[tokio::test]
    async fn should_not_duplicate_follow_up_on_repeated_approval() {
        let approved = fixtures::application("Ann", "Lee", "5551234567").with_status(ApplicationStatus::Approved);
        let existing = BankConnection::placeholder_for(&approved);
        let mut apps = repo_with(&approved, ApplicationStatus::Approved);
        apps.expect_update_status().returning(|_, _| Ok(false));
        let mut banks = MockBankConnectionRepository::new();
        banks
            .expect_find_by_application_id()
            .returning(move |_| Ok(Some(existing.clone())));
        banks.expect_create().never();

        let use_case = UpdateApplicationStatusUseCase::new(Arc::new(apps), Arc::new(banks));
        let change = use_case
            .execute(approved.id(), ApplicationStatus::Approved)
            .await
            .unwrap();

        assert!(!change.changed);
        assert!(!change.bank_connection_created);
        assert!(change.bank_connection.is_some());
        assert_eq!(change.application.status(), ApplicationStatus::Approved);
    }

    #[tokio::test]
    async fn should_reuse_winner_when_concurrent_insert_conflicts() {
        let application = fixtures::application("Ann", "Lee", "5551234567");
        let winner = BankConnection::placeholder_for(&application);
        let mut apps = repo_with(&application, ApplicationStatus::Approved);
        apps.expect_update_status().returning(|_, _| Ok(true));

        let mut seq = Sequence::new();
        let mut banks = MockBankConnectionRepository::new();
        banks
            .expect_find_by_application_id()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(None));
        banks
            .expect_find_by_applicant()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(None));
        banks
            .expect_create()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(RepositoryError::Conflict("uq_bank_connections_application_id".to_string())));
        banks
            .expect_find_by_application_id()
            .times(1)
            .in_sequence(&mut seq)
            .returning(move |_| Ok(Some(winner.clone())));

        let use_case = UpdateApplicationStatusUseCase::new(Arc::new(apps), Arc::new(banks));
        let change = use_case
            .execute(application.id(), ApplicationStatus::Approved)
            .await
            .unwrap();

        assert!(!change.bank_connection_created);
        assert!(change.bank_connection.is_some());
    }

    #[tokio::test]
    async fn should_never_report_an_existing_lead_as_missing_after_conflict() {
        let application = fixtures::application("Ann", "Lee", "5551234567");
        let id = *application.id();
        let mut apps = repo_with(&application, ApplicationStatus::Approved);
        apps.expect_update_status().returning(|_, _| Ok(true));
        let mut banks = MockBankConnectionRepository::new();
        no_linked_connection(&mut banks);
        banks.expect_find_by_applicant().returning(|_, _| Ok(None));
        banks
            .expect_create()
            .returning(|_| Err(RepositoryError::Conflict("uq_bank_connections_application_id".to_string())));

        let use_case = UpdateApplicationStatusUseCase::new(Arc::new(apps), Arc::new(banks));
        let err = use_case.execute(&id, ApplicationStatus::Approved).await.unwrap_err();

        assert_ne!(err.status_code(), axum::http::StatusCode::NOT_FOUND);
        assert!(matches!(err, UseCaseError::Repository(RepositoryError::Conflict(_))));
    }

    #[tokio::test]
    async fn should_roll_back_status_when_follow_up_creation_fails() {
        let application = fixtures::application("Ann", "Lee", "5551234567");
        let id = *application.id();
        let mut apps = repo_with(&application, ApplicationStatus::Approved);

        let mut seq = Sequence::new();
        apps.expect_update_status()
            .with(eq(id), eq(ApplicationStatus::Approved))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(true));
        apps.expect_update_status()
            .with(eq(id), eq(ApplicationStatus::New))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(true));

        let mut banks = MockBankConnectionRepository::new();
        no_linked_connection(&mut banks);
        banks.expect_find_by_applicant().returning(|_, _| Ok(None));
        banks
            .expect_create()
            .returning(|_| Err(RepositoryError::Unavailable("connection reset".to_string())));

        let use_case = UpdateApplicationStatusUseCase::new(Arc::new(apps), Arc::new(banks));
        let result = use_case.execute(&id, ApplicationStatus::Approved).await;

        assert!(matches!(
            result.unwrap_err(),
            UseCaseError::Repository(RepositoryError::Unavailable(_))
        ));
    }

    #[tokio::test]
    async fn should_not_roll_back_when_status_was_already_approved() {
        let approved = fixtures::application("Ann", "Lee", "5551234567").with_status(ApplicationStatus::Approved);
        let mut apps = repo_with(&approved, ApplicationStatus::Approved);
        apps.expect_update_status().times(1).returning(|_, _| Ok(false));

        let mut banks = MockBankConnectionRepository::new();
        no_linked_connection(&mut banks);
        banks.expect_find_by_applicant().returning(|_, _| Ok(None));
        banks
            .expect_create()
            .returning(|_| Err(RepositoryError::Mapping("bad row".to_string())));

        let use_case = UpdateApplicationStatusUseCase::new(Arc::new(apps), Arc::new(banks));
        let result = use_case.execute(approved.id(), ApplicationStatus::Approved).await;

        assert!(result.is_err());
    }
}
