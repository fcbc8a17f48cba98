//! Register Operator Use Case
//!
//! Creates an operator account from a username and plaintext password.

use std::sync::Arc;

use crate::domain::gateways::{CredentialHasher, OperatorRepository};
use crate::domain::models::operator::{normalize_username, Operator};
use crate::shared::errors::{RepositoryError, UseCaseError};

const MIN_PASSWORD_LEN: usize = 12;

pub struct RegisterOperatorUseCase {
    operator_repository: Arc<dyn OperatorRepository>,
    hasher: Arc<dyn CredentialHasher>,
}

impl RegisterOperatorUseCase {
    #[must_use]
    pub fn new(operator_repository: Arc<dyn OperatorRepository>, hasher: Arc<dyn CredentialHasher>) -> Self {
        Self {
            operator_repository,
            hasher,
        }
    }

    /// Execute the use case
    ///
    /// # Errors
    ///
    /// Returns `UseCaseError::Validation` for an empty username or a short password.
    /// Returns `UseCaseError::Conflict` if the username is taken.
    pub async fn execute(&self, username: &str, password: &str) -> Result<Operator, UseCaseError> {
        let username = normalize_username(username);

        let mut errors = Vec::new();
        if username.is_empty() {
            errors.push("username: Username is required".to_string());
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            errors.push(format!("password: Password must be at least {MIN_PASSWORD_LEN} characters"));
        }
        if !errors.is_empty() {
            return Err(UseCaseError::Validation(errors));
        }

        let hash = self
            .hasher
            .hash(password)
            .map_err(|err| UseCaseError::Internal(format!("password hashing failed: {err}")))?;
        let operator = Operator::new(&username, hash);

        let created = self.operator_repository.create(&operator).await.map_err(|err| match err {
            RepositoryError::Conflict(_) => UseCaseError::Conflict(format!("Operator '{username}' already exists")),
            other => other.into(),
        })?;

        tracing::info!(operator_id = %created.id(), username = created.username(), "Operator registered");
        Ok(created)
    }
}
