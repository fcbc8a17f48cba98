//! Login Operator Use Case
//!
//! Verifies operator credentials and issues a bearer token. Unknown users and
//! wrong passwords produce the same error.

use std::sync::Arc;

use crate::domain::gateways::{AccessToken, CredentialHasher, OperatorRepository, TokenIssuer};
use crate::domain::models::operator::normalize_username;
use crate::shared::errors::UseCaseError;

const INVALID_CREDENTIALS: &str = "Invalid username or password";

pub struct LoginOperatorUseCase {
    operator_repository: Arc<dyn OperatorRepository>,
    hasher: Arc<dyn CredentialHasher>,
    token_issuer: Arc<dyn TokenIssuer>,
}

impl LoginOperatorUseCase {
    #[must_use]
    pub fn new(
        operator_repository: Arc<dyn OperatorRepository>,
        hasher: Arc<dyn CredentialHasher>,
        token_issuer: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self {
            operator_repository,
            hasher,
            token_issuer,
        }
    }

    /// Execute the use case
    ///
    /// # Errors
    ///
    /// Returns `UseCaseError::Unauthorized` if the credentials don't match an operator.
    pub async fn execute(&self, username: &str, password: &str) -> Result<AccessToken, UseCaseError> {
        let username = normalize_username(username);

        let Some(operator) = self.operator_repository.find_by_username(&username).await? else {
            tracing::warn!("Login attempt for unknown operator");
            return Err(UseCaseError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        };

        if !self.hasher.verify(password, operator.password_hash()) {
            tracing::warn!(operator_id = %operator.id(), "Login attempt with wrong password");
            return Err(UseCaseError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }

        let token = self
            .token_issuer
            .issue(&operator)
            .map_err(|err| UseCaseError::Internal(format!("token signing failed: {err}")))?;

        tracing::info!(operator_id = %operator.id(), "Operator logged in");
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::gateways::credential_hasher::MockCredentialHasher;
    use crate::domain::gateways::operator_repository::MockOperatorRepository;
    use crate::domain::gateways::token_issuer::MockTokenIssuer;
    use crate::domain::models::operator::Operator;

    fn repo_with_operator() -> MockOperatorRepository {
        let mut repo = MockOperatorRepository::new();
        repo.expect_find_by_username()
            .returning(|name| Ok((name == "ops").then(|| Operator::new("ops", "stored-hash".to_string()))));
        repo
    }

    fn hasher() -> MockCredentialHasher {
        let mut hasher = MockCredentialHasher::new();
        hasher
            .expect_verify()
            .returning(|password, hash| password == "correct horse battery" && hash == "stored-hash");
        hasher
    }

    fn issuer() -> MockTokenIssuer {
        let mut issuer = MockTokenIssuer::new();
        issuer.expect_issue().returning(|_| {
            Ok(AccessToken {
                token: "signed.jwt.token".to_string(),
                expires_in: 3600,
            })
        });
        issuer
    }

    #[tokio::test]
    async fn should_issue_token_for_valid_credentials() {
        let use_case = LoginOperatorUseCase::new(Arc::new(repo_with_operator()), Arc::new(hasher()), Arc::new(issuer()));
        let token = use_case.execute("OPS", "correct horse battery").await.unwrap();

        assert_eq!(token.token, "signed.jwt.token");
        assert_eq!(token.expires_in, 3600);
    }

    #[tokio::test]
    async fn should_fail_identically_for_unknown_user_and_wrong_password() {
        let use_case = LoginOperatorUseCase::new(Arc::new(repo_with_operator()), Arc::new(hasher()), Arc::new(issuer()));

        let unknown = use_case.execute("nobody", "correct horse battery").await.unwrap_err();
        let wrong = use_case.execute("ops", "wrong password!!").await.unwrap_err();

        assert_eq!(unknown.to_string(), wrong.to_string());
        assert!(matches!(unknown, UseCaseError::Unauthorized(_)));
    }
}
