//! Operator Repository Gateway

use async_trait::async_trait;

use crate::domain::models::operator::Operator;
use crate::shared::errors::RepositoryError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OperatorRepository: Send + Sync {
    /// Find an operator by normalised username
    async fn find_by_username(&self, username: &str) -> Result<Option<Operator>, RepositoryError>;

    /// Insert a new operator; `RepositoryError::Conflict` if the username is taken
    async fn create(&self, operator: &Operator) -> Result<Operator, RepositoryError>;
}
