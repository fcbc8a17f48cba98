//! Record Store
//!
//! The PostgreSQL pool shared by every repository, constructed once at startup.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use super::config::DatabaseConfig;
use crate::domain::gateways::StoreHealth;
use crate::shared::errors::RepositoryError;

/// Handle to the record store. Cloning shares the underlying pool.
#[derive(Debug, Clone)]
pub struct RecordStore {
    pool: PgPool,
}

impl RecordStore {
    /// Create a PostgreSQL connection pool from configuration
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error` if the initial connections cannot be established.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
            .connect(&config.url)
            .await?;

        tracing::info!(max_connections = config.max_connections, "Record store connected");
        Ok(Self { pool })
    }

    #[must_use]
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Apply pending migrations from `migrations/`
    ///
    /// # Errors
    ///
    /// Returns `MigrateError` if a migration fails or the history is inconsistent.
    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await
    }
}

#[async_trait]
impl StoreHealth for RecordStore {
    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|err| RepositoryError::Unavailable(err.to_string()))?;
        Ok(())
    }
}
