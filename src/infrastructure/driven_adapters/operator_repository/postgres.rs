//! PostgreSQL Operator Repository Implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::gateways::OperatorRepository;
use crate::domain::models::operator::{Operator, OperatorId};
use crate::infrastructure::driven_adapters::database::RecordStore;
use crate::shared::errors::RepositoryError;

#[derive(Debug, sqlx::FromRow)]
struct OperatorRow {
    id: Uuid,
    username: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl From<OperatorRow> for Operator {
    fn from(row: OperatorRow) -> Self {
        Operator::restore(OperatorId::from_uuid(row.id), row.username, row.password_hash, row.created_at)
    }
}

pub struct PostgresOperatorRepository {
    pool: PgPool,
}

impl PostgresOperatorRepository {
    #[must_use]
    pub fn new(store: &RecordStore) -> Self {
        Self {
            pool: store.pool().clone(),
        }
    }
}

#[async_trait]
impl OperatorRepository for PostgresOperatorRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<Operator>, RepositoryError> {
        let row = sqlx::query_as::<_, OperatorRow>(
            "SELECT id, username, password_hash, created_at FROM operators WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Operator::from))
    }

    async fn create(&self, operator: &Operator) -> Result<Operator, RepositoryError> {
        let row = sqlx::query_as::<_, OperatorRow>(
            r#"
            INSERT INTO operators (id, username, password_hash, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, username, password_hash, created_at
            "#,
        )
        .bind(operator.id().as_uuid())
        .bind(operator.username())
        .bind(operator.password_hash())
        .bind(operator.created_at())
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }
}
