//! Bank Connection DTOs
//!
//! Unknown fields are rejected so that credentials can never be submitted
//! alongside the follow-up.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::application::{normalize_phone, validate_phone, validate_positive_amount};
use crate::domain::models::application::{ApplicationId, RequestMetadata};
use crate::domain::models::bank_connection::{BankConnection, CreateBankConnectionData};
use crate::domain::models::pagination::Page;

/// DTO for recording a bank connection follow-up (public, post-approval)
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateBankConnectionDto {
    pub application_id: Option<Uuid>,

    #[validate(length(min = 2, max = 200, message = "Must be at least 2 characters"))]
    pub name: String,

    #[validate(custom(function = "validate_phone"))]
    pub phone: String,

    #[serde(alias = "bankAccount")]
    #[validate(length(min = 1, max = 100, message = "This field is required"))]
    pub bank_name: String,

    #[validate(length(max = 100, message = "Must be at most 100 characters"))]
    pub custom_bank_name: Option<String>,

    #[validate(custom(function = "validate_positive_amount"))]
    pub approved_amount: Decimal,

    #[validate(length(min = 1, max = 50, message = "Must be between 1 and 50 characters"))]
    pub status: Option<String>,
}

impl CreateBankConnectionDto {
    #[must_use]
    pub fn into_domain(self, metadata: RequestMetadata) -> CreateBankConnectionData {
        CreateBankConnectionData {
            application_id: self.application_id.map(ApplicationId::from_uuid),
            name: self.name.trim().to_string(),
            phone: normalize_phone(&self.phone),
            bank_name: self.bank_name,
            custom_bank_name: self.custom_bank_name.filter(|name| !name.trim().is_empty()),
            approved_amount: self.approved_amount,
            status: self.status,
            metadata,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBankConnectionResponseDto {
    pub success: bool,
    pub message: String,
    pub connection_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BankConnectionResponseDto {
    pub id: String,
    pub application_id: Option<String>,
    pub name: String,
    pub phone: String,
    pub bank_name: String,
    pub custom_bank_name: Option<String>,
    pub approved_amount: Decimal,
    pub status: String,
    pub submitted_at: DateTime<Utc>,
}

impl From<&BankConnection> for BankConnectionResponseDto {
    fn from(connection: &BankConnection) -> Self {
        Self {
            id: connection.id().to_string(),
            application_id: connection.application_id().map(ToString::to_string),
            name: connection.name().to_string(),
            phone: connection.phone().to_string(),
            bank_name: connection.bank_name().to_string(),
            custom_bank_name: connection.custom_bank_name().map(str::to_string),
            approved_amount: connection.approved_amount(),
            status: connection.status().to_string(),
            submitted_at: connection.submitted_at(),
        }
    }
}

impl From<BankConnection> for BankConnectionResponseDto {
    fn from(connection: BankConnection) -> Self {
        Self::from(&connection)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankConnectionListResponseDto {
    pub connections: Vec<BankConnectionResponseDto>,
    pub total: u64,
    pub page: u32,
    pub total_pages: u64,
}

impl From<Page<BankConnection>> for BankConnectionListResponseDto {
    fn from(page: Page<BankConnection>) -> Self {
        let total_pages = page.total_pages();
        let page = page.map(BankConnectionResponseDto::from);
        Self {
            connections: page.items,
            total: page.total,
            page: page.page,
            total_pages,
        }
    }
}
