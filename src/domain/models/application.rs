//! Loan Application Domain Model
//!
//! A lead submitted through the public application form.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::errors::DomainError;

/// Newtype wrapper for application IDs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ApplicationId(Uuid);

impl ApplicationId {
    /// Create a new random ApplicationId
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create an ApplicationId from an existing UUID
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get the underlying UUID
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ApplicationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for ApplicationId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl TryFrom<&str> for ApplicationId {
    type Error = uuid::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Ok(Self(Uuid::parse_str(value)?))
    }
}

/// Lifecycle status of a loan application.
///
/// Any status may be set from any other; there is no transition graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    New,
    Pending,
    Approved,
    Rejected,
}

impl ApplicationStatus {
    pub const ALL: [ApplicationStatus; 4] = [Self::New, Self::Pending, Self::Approved, Self::Rejected];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Map a dashboard label onto the stored status.
    ///
    /// The dashboard shows "contacted" for leads an operator has reached out
    /// to; those are stored as `pending`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStatus` for unknown labels.
    pub fn from_dashboard_label(label: &str) -> Result<Self, DomainError> {
        match label.trim().to_ascii_lowercase().as_str() {
            "contacted" => Ok(Self::Pending),
            other => other.parse(),
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApplicationStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(Self::New),
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            other => Err(DomainError::InvalidStatus(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmploymentStatus {
    FullTime,
    PartTime,
    SelfEmployed,
    Retired,
    Benefits,
}

impl EmploymentStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FullTime => "full-time",
            Self::PartTime => "part-time",
            Self::SelfEmployed => "self-employed",
            Self::Retired => "retired",
            Self::Benefits => "benefits",
        }
    }
}

impl FromStr for EmploymentStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "full-time" => Ok(Self::FullTime),
            "part-time" => Ok(Self::PartTime),
            "self-employed" => Ok(Self::SelfEmployed),
            "retired" => Ok(Self::Retired),
            "benefits" => Ok(Self::Benefits),
            other => Err(DomainError::InvalidValue {
                field: "employmentStatus",
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BankAccountType {
    Checking,
    Savings,
}

impl BankAccountType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Checking => "checking",
            Self::Savings => "savings",
        }
    }
}

impl FromStr for BankAccountType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "checking" => Ok(Self::Checking),
            "savings" => Ok(Self::Savings),
            other => Err(DomainError::InvalidValue {
                field: "bankAccount",
                value: other.to_string(),
            }),
        }
    }
}

/// Bank slug used when the applicant's bank is not in the predefined list
pub const OTHER_BANK: &str = "other";

/// Personal details of the applicant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicantProfile {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub date_of_birth: NaiveDate,
    pub ssn_last_four: String,
}

impl ApplicantProfile {
    /// Display name used to match follow-up records
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Income, requested amount and banking relationship
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinancialProfile {
    pub monthly_income: String,
    pub loan_amount: Decimal,
    pub employment_status: EmploymentStatus,
    pub bank_account_type: BankAccountType,
    pub bank_name: String,
    pub custom_bank_name: Option<String>,
    pub bank_duration: String,
}

/// Where a submission came from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestMetadata {
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

/// Data required to submit a new application
#[derive(Debug, Clone)]
pub struct SubmitApplicationData {
    pub applicant: ApplicantProfile,
    pub financial: FinancialProfile,
    pub metadata: RequestMetadata,
}

/// Loan application domain entity
#[derive(Debug, Clone)]
pub struct LoanApplication {
    id: ApplicationId,
    applicant: ApplicantProfile,
    financial: FinancialProfile,
    status: ApplicationStatus,
    submitted_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    metadata: RequestMetadata,
}

impl LoanApplication {
    /// Create a freshly submitted application with status `new`
    #[must_use]
    pub fn new(data: SubmitApplicationData) -> Self {
        let now = Utc::now();
        Self {
            id: ApplicationId::new(),
            applicant: data.applicant,
            financial: data.financial,
            status: ApplicationStatus::New,
            submitted_at: now,
            updated_at: now,
            metadata: data.metadata,
        }
    }

    /// Restore an application from persisted data
    #[must_use]
    pub fn restore(
        id: ApplicationId,
        applicant: ApplicantProfile,
        financial: FinancialProfile,
        status: ApplicationStatus,
        submitted_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
        metadata: RequestMetadata,
    ) -> Self {
        Self {
            id,
            applicant,
            financial,
            status,
            submitted_at,
            updated_at,
            metadata,
        }
    }

    /// Return a copy carrying a new status and a fresh `updated_at`
    #[must_use]
    pub fn with_status(self, status: ApplicationStatus) -> Self {
        Self {
            status,
            updated_at: Utc::now(),
            ..self
        }
    }

    /// Name of the bank as the applicant would recognise it
    #[must_use]
    pub fn display_bank_name(&self) -> &str {
        match (&self.financial.custom_bank_name, self.financial.bank_name.as_str()) {
            (Some(custom), OTHER_BANK) => custom.as_str(),
            (_, bank) => bank,
        }
    }

    // Getters

    #[must_use]
    pub fn id(&self) -> &ApplicationId {
        &self.id
    }

    #[must_use]
    pub fn applicant(&self) -> &ApplicantProfile {
        &self.applicant
    }

    #[must_use]
    pub fn financial(&self) -> &FinancialProfile {
        &self.financial
    }

    #[must_use]
    pub fn status(&self) -> ApplicationStatus {
        self.status
    }

    #[must_use]
    pub fn submitted_at(&self) -> DateTime<Utc> {
        self.submitted_at
    }

    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    #[must_use]
    pub fn metadata(&self) -> &RequestMetadata {
        &self.metadata
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::{application, submit_data};
    use super::*;

    #[test]
    fn test_application_id_new() {
        assert_ne!(ApplicationId::new(), ApplicationId::new());
    }

    #[test]
    fn test_application_id_try_from_str() {
        let uuid_str = "550e8400-e29b-41d4-a716-446655440000";
        let id = ApplicationId::try_from(uuid_str).unwrap();
        assert_eq!(id.to_string(), uuid_str);
        assert!(ApplicationId::try_from("not-a-uuid").is_err());
    }

    #[test]
    fn test_new_application_starts_as_new() {
        let data = submit_data("Ann", "Lee", "5551234567");
        let app = LoanApplication::new(data.clone());

        assert_eq!(app.status(), ApplicationStatus::New);
        assert_eq!(app.submitted_at(), app.updated_at());
        assert_eq!(app.applicant(), &data.applicant);
        assert_eq!(app.financial(), &data.financial);
        assert_eq!(app.applicant().full_name(), "Ann Lee");
    }

    #[test]
    fn test_with_status_allows_any_transition() {
        let app = application("Ann", "Lee", "5551234567");
        let submitted_at = app.submitted_at();

        let rejected = app.with_status(ApplicationStatus::Rejected);
        assert_eq!(rejected.status(), ApplicationStatus::Rejected);

        let back_to_new = rejected.with_status(ApplicationStatus::New);
        assert_eq!(back_to_new.status(), ApplicationStatus::New);
        assert_eq!(back_to_new.submitted_at(), submitted_at);
        assert!(back_to_new.updated_at() >= submitted_at);
    }

    #[test]
    fn test_status_parsing() {
        for status in ApplicationStatus::ALL {
            assert_eq!(status.as_str().parse::<ApplicationStatus>().unwrap(), status);
        }
        assert!("contacted".parse::<ApplicationStatus>().is_err());
        assert!("APPROVED".parse::<ApplicationStatus>().is_err());
    }

    #[test]
    fn test_dashboard_label_mapping() {
        assert_eq!(
            ApplicationStatus::from_dashboard_label("contacted").unwrap(),
            ApplicationStatus::Pending
        );
        assert_eq!(
            ApplicationStatus::from_dashboard_label(" Approved ").unwrap(),
            ApplicationStatus::Approved
        );
        assert!(ApplicationStatus::from_dashboard_label("archived").is_err());
    }

    #[test]
    fn test_display_bank_name_prefers_custom_name_for_other() {
        let mut data = submit_data("Ann", "Lee", "5551234567");
        data.financial.bank_name = OTHER_BANK.to_string();
        data.financial.custom_bank_name = Some("Lakeside Credit Union".to_string());
        let app = LoanApplication::new(data);
        assert_eq!(app.display_bank_name(), "Lakeside Credit Union");

        let plain = application("Bo", "Ray", "5550000000");
        assert_eq!(plain.display_bank_name(), "chase");
    }

    #[test]
    fn test_enum_round_trips_through_str() {
        assert_eq!("self-employed".parse::<EmploymentStatus>().unwrap(), EmploymentStatus::SelfEmployed);
        assert_eq!(EmploymentStatus::PartTime.as_str(), "part-time");
        assert_eq!("savings".parse::<BankAccountType>().unwrap(), BankAccountType::Savings);
        assert!("brokerage".parse::<BankAccountType>().is_err());
    }
}
