//! PostgreSQL Bank Connection Repository Implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::gateways::{BankConnectionQuery, BankConnectionRepository};
use crate::domain::models::application::{ApplicationId, RequestMetadata};
use crate::domain::models::bank_connection::{BankConnection, BankConnectionId};
use crate::domain::models::pagination::Page;
use crate::infrastructure::driven_adapters::database::RecordStore;
use crate::shared::errors::RepositoryError;

const COLUMNS: &str = "id, application_id, name, phone, bank_name, custom_bank_name, \
     approved_amount, status, submitted_at, ip_address, user_agent";

#[derive(Debug, sqlx::FromRow)]
struct BankConnectionRow {
    id: Uuid,
    application_id: Option<Uuid>,
    name: String,
    phone: String,
    bank_name: String,
    custom_bank_name: Option<String>,
    approved_amount: Decimal,
    status: String,
    submitted_at: DateTime<Utc>,
    ip_address: Option<String>,
    user_agent: Option<String>,
}

impl From<BankConnectionRow> for BankConnection {
    fn from(row: BankConnectionRow) -> Self {
        BankConnection::restore(
            BankConnectionId::from_uuid(row.id),
            row.application_id.map(ApplicationId::from_uuid),
            row.name,
            row.phone,
            row.bank_name,
            row.custom_bank_name,
            row.approved_amount,
            row.status,
            row.submitted_at,
            RequestMetadata {
                ip_address: row.ip_address,
                user_agent: row.user_agent,
            },
        )
    }
}

/// PostgreSQL implementation of BankConnectionRepository
pub struct PostgresBankConnectionRepository {
    pool: PgPool,
}

impl PostgresBankConnectionRepository {
    #[must_use]
    pub fn new(store: &RecordStore) -> Self {
        Self {
            pool: store.pool().clone(),
        }
    }
}

#[async_trait]
impl BankConnectionRepository for PostgresBankConnectionRepository {
    async fn create(&self, connection: &BankConnection) -> Result<BankConnection, RepositoryError> {
        let metadata = connection.metadata();

        let row = sqlx::query_as::<_, BankConnectionRow>(&format!(
            r#"
            INSERT INTO bank_connections (
                id, application_id, name, phone, bank_name, custom_bank_name,
                approved_amount, status, submitted_at, ip_address, user_agent
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(connection.id().as_uuid())
        .bind(connection.application_id().map(ApplicationId::as_uuid))
        .bind(connection.name())
        .bind(connection.phone())
        .bind(connection.bank_name())
        .bind(connection.custom_bank_name())
        .bind(connection.approved_amount())
        .bind(connection.status())
        .bind(connection.submitted_at())
        .bind(metadata.ip_address.as_deref())
        .bind(metadata.user_agent.as_deref())
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn list(&self, query: &BankConnectionQuery) -> Result<Page<BankConnection>, RepositoryError> {
        let status = query.status.as_deref();

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM bank_connections
            WHERE ($1::text IS NULL OR status = $1)
            "#,
        )
        .bind(status)
        .fetch_one(&self.pool)
        .await?;

        let rows = sqlx::query_as::<_, BankConnectionRow>(&format!(
            r#"
            SELECT {COLUMNS}
            FROM bank_connections
            WHERE ($1::text IS NULL OR status = $1)
            ORDER BY submitted_at DESC, id
            LIMIT $2 OFFSET $3
            "#
        ))
        .bind(status)
        .bind(i64::from(query.page.limit()))
        .bind(query.page.offset())
        .fetch_all(&self.pool)
        .await?;

        let total = u64::try_from(total).map_err(|e| RepositoryError::Mapping(e.to_string()))?;
        Ok(Page::new(
            rows.into_iter().map(BankConnection::from).collect(),
            total,
            query.page,
        ))
    }

    async fn find_by_application_id(
        &self,
        application_id: &ApplicationId,
    ) -> Result<Option<BankConnection>, RepositoryError> {
        let row = sqlx::query_as::<_, BankConnectionRow>(&format!(
            r#"
            SELECT {COLUMNS}
            FROM bank_connections
            WHERE application_id = $1
            "#
        ))
        .bind(application_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(BankConnection::from))
    }

    async fn find_by_applicant(&self, name: &str, phone: &str) -> Result<Option<BankConnection>, RepositoryError> {
        let row = sqlx::query_as::<_, BankConnectionRow>(&format!(
            r#"
            SELECT {COLUMNS}
            FROM bank_connections
            WHERE name = $1 AND phone = $2
            ORDER BY submitted_at ASC
            LIMIT 1
            "#
        ))
        .bind(name)
        .bind(phone)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(BankConnection::from))
    }

    async fn delete(&self, id: &BankConnectionId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM bank_connections WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
