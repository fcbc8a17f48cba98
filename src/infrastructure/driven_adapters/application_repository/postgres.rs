//! PostgreSQL Application Repository Implementation
//!
//! Implements the ApplicationRepository trait using SQLx for PostgreSQL.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::gateways::{ApplicationQuery, ApplicationRepository};
use crate::domain::models::application::{
    ApplicantProfile, ApplicationId, ApplicationStatus, FinancialProfile, LoanApplication, RequestMetadata,
};
use crate::domain::models::pagination::Page;
use crate::domain::models::stats::StatusTotal;
use crate::infrastructure::driven_adapters::database::RecordStore;
use crate::shared::errors::RepositoryError;

const COLUMNS: &str = "id, first_name, last_name, email, phone, date_of_birth, ssn_last_four, \
     monthly_income, loan_amount, employment_status, bank_account_type, bank_name, \
     custom_bank_name, bank_duration, status, submitted_at, updated_at, ip_address, user_agent";

/// Database row representation for the loan_applications table
#[derive(Debug, sqlx::FromRow)]
struct ApplicationRow {
    id: Uuid,
    first_name: String,
    last_name: String,
    email: String,
    phone: String,
    date_of_birth: NaiveDate,
    ssn_last_four: String,
    monthly_income: String,
    loan_amount: Decimal,
    employment_status: String,
    bank_account_type: String,
    bank_name: String,
    custom_bank_name: Option<String>,
    bank_duration: String,
    status: String,
    submitted_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    ip_address: Option<String>,
    user_agent: Option<String>,
}

impl TryFrom<ApplicationRow> for LoanApplication {
    type Error = RepositoryError;

    fn try_from(row: ApplicationRow) -> Result<Self, Self::Error> {
        Ok(LoanApplication::restore(
            ApplicationId::from_uuid(row.id),
            ApplicantProfile {
                first_name: row.first_name,
                last_name: row.last_name,
                email: row.email,
                phone: row.phone,
                date_of_birth: row.date_of_birth,
                ssn_last_four: row.ssn_last_four.trim_end().to_string(),
            },
            FinancialProfile {
                monthly_income: row.monthly_income,
                loan_amount: row.loan_amount,
                employment_status: row.employment_status.parse()?,
                bank_account_type: row.bank_account_type.parse()?,
                bank_name: row.bank_name,
                custom_bank_name: row.custom_bank_name,
                bank_duration: row.bank_duration,
            },
            row.status.parse()?,
            row.submitted_at,
            row.updated_at,
            RequestMetadata {
                ip_address: row.ip_address,
                user_agent: row.user_agent,
            },
        ))
    }
}

#[derive(Debug, sqlx::FromRow)]
struct StatusTotalRow {
    status: String,
    count: i64,
    loan_amount: Decimal,
}

impl TryFrom<StatusTotalRow> for StatusTotal {
    type Error = RepositoryError;

    fn try_from(row: StatusTotalRow) -> Result<Self, Self::Error> {
        Ok(StatusTotal {
            status: row.status.parse()?,
            count: u64::try_from(row.count).map_err(|e| RepositoryError::Mapping(e.to_string()))?,
            loan_amount: row.loan_amount,
        })
    }
}

/// PostgreSQL implementation of ApplicationRepository
pub struct PostgresApplicationRepository {
    pool: PgPool,
}

impl PostgresApplicationRepository {
    #[must_use]
    pub fn new(store: &RecordStore) -> Self {
        Self {
            pool: store.pool().clone(),
        }
    }
}

#[async_trait]
impl ApplicationRepository for PostgresApplicationRepository {
    async fn create(&self, application: &LoanApplication) -> Result<LoanApplication, RepositoryError> {
        let applicant = application.applicant();
        let financial = application.financial();
        let metadata = application.metadata();

        let row = sqlx::query_as::<_, ApplicationRow>(&format!(
            r#"
            INSERT INTO loan_applications (
                id, first_name, last_name, email, phone, date_of_birth, ssn_last_four,
                monthly_income, loan_amount, employment_status, bank_account_type, bank_name,
                custom_bank_name, bank_duration, status, submitted_at, updated_at, ip_address, user_agent
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(application.id().as_uuid())
        .bind(&applicant.first_name)
        .bind(&applicant.last_name)
        .bind(&applicant.email)
        .bind(&applicant.phone)
        .bind(applicant.date_of_birth)
        .bind(&applicant.ssn_last_four)
        .bind(&financial.monthly_income)
        .bind(financial.loan_amount)
        .bind(financial.employment_status.as_str())
        .bind(financial.bank_account_type.as_str())
        .bind(&financial.bank_name)
        .bind(financial.custom_bank_name.as_deref())
        .bind(&financial.bank_duration)
        .bind(application.status().as_str())
        .bind(application.submitted_at())
        .bind(application.updated_at())
        .bind(metadata.ip_address.as_deref())
        .bind(metadata.user_agent.as_deref())
        .fetch_one(&self.pool)
        .await?;

        LoanApplication::try_from(row)
    }

    async fn list(&self, query: &ApplicationQuery) -> Result<Page<LoanApplication>, RepositoryError> {
        let status = query.status.map(ApplicationStatus::as_str);

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM loan_applications
            WHERE ($1::text IS NULL OR status = $1)
            "#,
        )
        .bind(status)
        .fetch_one(&self.pool)
        .await?;

        let rows = sqlx::query_as::<_, ApplicationRow>(&format!(
            r#"
            SELECT {COLUMNS}
            FROM loan_applications
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

        let items = rows
            .into_iter()
            .map(LoanApplication::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        let total = u64::try_from(total).map_err(|e| RepositoryError::Mapping(e.to_string()))?;

        Ok(Page::new(items, total, query.page))
    }

    async fn find_by_id(&self, id: &ApplicationId) -> Result<Option<LoanApplication>, RepositoryError> {
        let row = sqlx::query_as::<_, ApplicationRow>(&format!(
            r#"
            SELECT {COLUMNS}
            FROM loan_applications
            WHERE id = $1
            "#
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(LoanApplication::try_from).transpose()
    }

    async fn update_status(&self, id: &ApplicationId, status: ApplicationStatus) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE loan_applications
            SET status = $2, updated_at = NOW()
            WHERE id = $1 AND status <> $2
            "#,
        )
        .bind(id.as_uuid())
        .bind(status.as_str())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: &ApplicationId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM loan_applications WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn status_totals(&self) -> Result<Vec<StatusTotal>, RepositoryError> {
        let rows = sqlx::query_as::<_, StatusTotalRow>(
            r#"
            SELECT status, COUNT(*) AS count, COALESCE(SUM(loan_amount), 0) AS loan_amount
            FROM loan_applications
            GROUP BY status
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(StatusTotal::try_from).collect()
    }
}
