//! Bank Connection Domain Model
//!
//! A post-approval follow-up recording which bank the applicant will use to
//! receive funds. Holds contact details only; no banking credentials.

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use super::application::{ApplicationId, LoanApplication, RequestMetadata, OTHER_BANK};

/// Status given to follow-ups created directly by the applicant
pub const DEFAULT_CONNECTION_STATUS: &str = "pending_verification";

/// Status given to placeholders created when a lead is approved
pub const APPROVAL_PLACEHOLDER_STATUS: &str = "approved_pending_bank_setup";

/// Newtype wrapper for bank connection IDs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BankConnectionId(Uuid);

impl BankConnectionId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for BankConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BankConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Data required to create a bank connection
#[derive(Debug, Clone)]
pub struct CreateBankConnectionData {
    pub application_id: Option<ApplicationId>,
    pub name: String,
    pub phone: String,
    pub bank_name: String,
    pub custom_bank_name: Option<String>,
    pub approved_amount: Decimal,
    pub status: Option<String>,
    pub metadata: RequestMetadata,
}

/// Bank connection domain entity
#[derive(Debug, Clone)]
pub struct BankConnection {
    id: BankConnectionId,
    application_id: Option<ApplicationId>,
    name: String,
    phone: String,
    bank_name: String,
    custom_bank_name: Option<String>,
    approved_amount: Decimal,
    status: String,
    submitted_at: DateTime<Utc>,
    metadata: RequestMetadata,
}

impl BankConnection {
    /// Create a new bank connection, defaulting the status to `pending_verification`
    #[must_use]
    pub fn new(data: CreateBankConnectionData) -> Self {
        let status = data
            .status
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_CONNECTION_STATUS.to_string());

        Self {
            id: BankConnectionId::new(),
            application_id: data.application_id,
            name: data.name,
            phone: data.phone,
            bank_name: data.bank_name,
            custom_bank_name: data.custom_bank_name,
            approved_amount: data.approved_amount,
            status,
            submitted_at: Utc::now(),
            metadata: data.metadata,
        }
    }

    /// Placeholder created when an application is approved
    #[must_use]
    pub fn placeholder_for(application: &LoanApplication) -> Self {
        let financial = application.financial();
        let bank_name = if financial.bank_name == OTHER_BANK {
            "Other".to_string()
        } else {
            financial.bank_name.clone()
        };

        Self::new(CreateBankConnectionData {
            application_id: Some(*application.id()),
            name: application.applicant().full_name(),
            phone: application.applicant().phone.clone(),
            bank_name,
            custom_bank_name: Some(application.display_bank_name().to_string()),
            approved_amount: financial.loan_amount,
            status: Some(APPROVAL_PLACEHOLDER_STATUS.to_string()),
            metadata: RequestMetadata::default(),
        })
    }

    /// Restore a bank connection from persisted data
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn restore(
        id: BankConnectionId,
        application_id: Option<ApplicationId>,
        name: String,
        phone: String,
        bank_name: String,
        custom_bank_name: Option<String>,
        approved_amount: Decimal,
        status: String,
        submitted_at: DateTime<Utc>,
        metadata: RequestMetadata,
    ) -> Self {
        Self {
            id,
            application_id,
            name,
            phone,
            bank_name,
            custom_bank_name,
            approved_amount,
            status,
            submitted_at,
            metadata,
        }
    }

    /// Whether this follow-up belongs to the applicant with the given name and phone
    #[must_use]
    pub fn matches_applicant(&self, name: &str, phone: &str) -> bool {
        self.name == name && self.phone == phone
    }

    // Getters

    #[must_use]
    pub fn id(&self) -> &BankConnectionId {
        &self.id
    }

    #[must_use]
    pub fn application_id(&self) -> Option<&ApplicationId> {
        self.application_id.as_ref()
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn phone(&self) -> &str {
        &self.phone
    }

    #[must_use]
    pub fn bank_name(&self) -> &str {
        &self.bank_name
    }

    #[must_use]
    pub fn custom_bank_name(&self) -> Option<&str> {
        self.custom_bank_name.as_deref()
    }

    #[must_use]
    pub fn approved_amount(&self) -> Decimal {
        self.approved_amount
    }

    #[must_use]
    pub fn status(&self) -> &str {
        &self.status
    }

    #[must_use]
    pub fn submitted_at(&self) -> DateTime<Utc> {
        self.submitted_at
    }

    #[must_use]
    pub fn metadata(&self) -> &RequestMetadata {
        &self.metadata
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::application::fixtures;
    use rust_decimal_macros::dec;

    fn create_data(status: Option<&str>) -> CreateBankConnectionData {
        CreateBankConnectionData {
            application_id: None,
            name: "Ann Lee".to_string(),
            phone: "5551234567".to_string(),
            bank_name: "chase".to_string(),
            custom_bank_name: None,
            approved_amount: dec!(2500),
            status: status.map(str::to_string),
            metadata: RequestMetadata::default(),
        }
    }

    #[test]
    fn test_status_defaults_to_pending_verification() {
        assert_eq!(BankConnection::new(create_data(None)).status(), DEFAULT_CONNECTION_STATUS);
        assert_eq!(BankConnection::new(create_data(Some("  "))).status(), DEFAULT_CONNECTION_STATUS);
        assert_eq!(BankConnection::new(create_data(Some("bank_connected"))).status(), "bank_connected");
    }

    #[test]
    fn test_placeholder_copies_applicant_details() {
        let application = fixtures::application("Ann", "Lee", "5551234567");
        let placeholder = BankConnection::placeholder_for(&application);

        assert_eq!(placeholder.name(), "Ann Lee");
        assert_eq!(placeholder.phone(), "5551234567");
        assert_eq!(placeholder.bank_name(), "chase");
        assert_eq!(placeholder.custom_bank_name(), Some("chase"));
        assert_eq!(placeholder.approved_amount(), dec!(2500));
        assert_eq!(placeholder.status(), APPROVAL_PLACEHOLDER_STATUS);
        assert_eq!(placeholder.application_id(), Some(application.id()));
        assert!(placeholder.matches_applicant("Ann Lee", "5551234567"));
        assert!(!placeholder.matches_applicant("Ann Lee", "5550000000"));
    }

    #[test]
    fn test_placeholder_for_other_bank_uses_custom_name() {
        let mut data = fixtures::submit_data("Ann", "Lee", "5551234567");
        data.financial.bank_name = OTHER_BANK.to_string();
        data.financial.custom_bank_name = Some("Lakeside Credit Union".to_string());
        let application = LoanApplication::new(data);

        let placeholder = BankConnection::placeholder_for(&application);
        assert_eq!(placeholder.bank_name(), "Other");
        assert_eq!(placeholder.custom_bank_name(), Some("Lakeside Credit Union"));
    }
}
