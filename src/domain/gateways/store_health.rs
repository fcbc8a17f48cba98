//! Record Store Health
//!
//! Liveness check against the backing store.

use async_trait::async_trait;

use crate::shared::errors::RepositoryError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StoreHealth: Send + Sync {
    /// Round-trip a trivial query; `RepositoryError::Unavailable` when unreachable
    async fn ping(&self) -> Result<(), RepositoryError>;
}
