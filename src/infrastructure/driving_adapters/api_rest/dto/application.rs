//! Loan Application DTOs
//!
//! Request and response bodies for the application endpoints.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::domain::models::application::{
    ApplicantProfile, BankAccountType, EmploymentStatus, FinancialProfile, LoanApplication, RequestMetadata,
    SubmitApplicationData, OTHER_BANK,
};
use crate::domain::models::pagination::Page;
use crate::domain::models::stats::ApplicationStats;

/// Applicants must be adults on the day they apply
pub const MINIMUM_AGE_YEARS: i32 = 18;

lazy_static! {
    /// US phone number, optionally formatted as `(555) 123-4567`
    static ref PHONE_REGEX: Regex =
        Regex::new(r"^\(?\d{3}\)?[\s.-]?\d{3}[\s.-]?\d{4}$").expect("valid regex");
    static ref SSN_LAST_FOUR_REGEX: Regex = Regex::new(r"^\d{4}$").expect("valid regex");
}

fn validation_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.into());
    error
}

pub(crate) fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if PHONE_REGEX.is_match(phone.trim()) {
        Ok(())
    } else {
        Err(validation_error("phone", "Please enter a valid 10-digit phone number"))
    }
}

fn validate_ssn_last_four(value: &str) -> Result<(), ValidationError> {
    if SSN_LAST_FOUR_REGEX.is_match(value) {
        Ok(())
    } else {
        Err(validation_error("ssn_last_four", "Must be exactly 4 digits"))
    }
}

pub(crate) fn validate_positive_amount(amount: &Decimal) -> Result<(), ValidationError> {
    if amount.is_sign_positive() && !amount.is_zero() {
        Ok(())
    } else {
        Err(validation_error("amount", "Amount must be greater than zero"))
    }
}

fn age_on(date_of_birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - date_of_birth.year();
    if (today.month(), today.day()) < (date_of_birth.month(), date_of_birth.day()) {
        age -= 1;
    }
    age
}

fn validate_adult(date_of_birth: &NaiveDate) -> Result<(), ValidationError> {
    if age_on(*date_of_birth, Utc::now().date_naive()) >= MINIMUM_AGE_YEARS {
        Ok(())
    } else {
        Err(validation_error("date_of_birth", "Applicant must be at least 18 years old"))
    }
}

fn validate_custom_bank(dto: &SubmitApplicationDto) -> Result<(), ValidationError> {
    let missing = dto
        .custom_bank_name
        .as_deref()
        .map_or(true, |name| name.trim().is_empty());
    if dto.bank_name == OTHER_BANK && missing {
        return Err(validation_error("custom_bank_name", "Please enter your bank name"));
    }
    Ok(())
}

/// Keep only the digits of a phone number
pub(crate) fn normalize_phone(phone: &str) -> String {
    phone.chars().filter(char::is_ascii_digit).collect()
}

/// DTO for submitting a loan application (public form)
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_custom_bank", skip_on_field_errors = false))]
pub struct SubmitApplicationDto {
    #[validate(length(min = 2, max = 100, message = "Must be at least 2 characters"))]
    pub first_name: String,

    #[validate(length(min = 2, max = 100, message = "Must be at least 2 characters"))]
    pub last_name: String,

    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,

    #[validate(custom(function = "validate_phone"))]
    pub phone: String,

    #[validate(custom(function = "validate_adult"))]
    pub date_of_birth: NaiveDate,

    #[validate(custom(function = "validate_ssn_last_four"))]
    pub ssn_last_four: String,

    #[validate(length(min = 1, max = 32, message = "This field is required"))]
    pub monthly_income: String,

    #[validate(custom(function = "validate_positive_amount"))]
    pub loan_amount: Decimal,

    pub employment_status: EmploymentStatus,

    pub bank_account: BankAccountType,

    #[validate(length(min = 1, max = 100, message = "This field is required"))]
    pub bank_name: String,

    #[validate(length(max = 100, message = "Must be at most 100 characters"))]
    pub custom_bank_name: Option<String>,

    #[validate(length(min = 1, max = 50, message = "This field is required"))]
    pub bank_duration: String,
}

impl SubmitApplicationDto {
    /// Convert into domain data, attaching where the request came from
    #[must_use]
    pub fn into_domain(self, metadata: RequestMetadata) -> SubmitApplicationData {
        SubmitApplicationData {
            applicant: ApplicantProfile {
                first_name: self.first_name.trim().to_string(),
                last_name: self.last_name.trim().to_string(),
                email: self.email.trim().to_lowercase(),
                phone: normalize_phone(&self.phone),
                date_of_birth: self.date_of_birth,
                ssn_last_four: self.ssn_last_four,
            },
            financial: FinancialProfile {
                monthly_income: self.monthly_income,
                loan_amount: self.loan_amount,
                employment_status: self.employment_status,
                bank_account_type: self.bank_account,
                bank_name: self.bank_name,
                custom_bank_name: self.custom_bank_name.filter(|name| !name.trim().is_empty()),
                bank_duration: self.bank_duration,
            },
            metadata,
        }
    }
}

/// 201 body for a stored submission
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitApplicationResponseDto {
    pub success: bool,
    pub message: String,
    pub application_id: String,
}

/// Full application record as shown to operators
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationResponseDto {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub date_of_birth: NaiveDate,
    pub ssn_last_four: String,
    pub monthly_income: String,
    pub loan_amount: Decimal,
    pub employment_status: EmploymentStatus,
    pub bank_account: BankAccountType,
    pub bank_name: String,
    pub custom_bank_name: Option<String>,
    pub bank_duration: String,
    pub status: String,
    pub submitted_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

impl From<LoanApplication> for ApplicationResponseDto {
    fn from(application: LoanApplication) -> Self {
        Self::from(&application)
    }
}

impl From<&LoanApplication> for ApplicationResponseDto {
    fn from(application: &LoanApplication) -> Self {
        let applicant = application.applicant();
        let financial = application.financial();
        let metadata = application.metadata();

        Self {
            id: application.id().to_string(),
            first_name: applicant.first_name.clone(),
            last_name: applicant.last_name.clone(),
            email: applicant.email.clone(),
            phone: applicant.phone.clone(),
            date_of_birth: applicant.date_of_birth,
            ssn_last_four: applicant.ssn_last_four.clone(),
            monthly_income: financial.monthly_income.clone(),
            loan_amount: financial.loan_amount,
            employment_status: financial.employment_status,
            bank_account: financial.bank_account_type,
            bank_name: financial.bank_name.clone(),
            custom_bank_name: financial.custom_bank_name.clone(),
            bank_duration: financial.bank_duration.clone(),
            status: application.status().to_string(),
            submitted_at: application.submitted_at(),
            updated_at: application.updated_at(),
            ip_address: metadata.ip_address.clone(),
            user_agent: metadata.user_agent.clone(),
        }
    }
}

/// One page of applications
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationListResponseDto {
    pub applications: Vec<ApplicationResponseDto>,
    pub total: u64,
    pub page: u32,
    pub total_pages: u64,
}

impl From<Page<LoanApplication>> for ApplicationListResponseDto {
    fn from(page: Page<LoanApplication>) -> Self {
        let total_pages = page.total_pages();
        let page = page.map(ApplicationResponseDto::from);
        Self {
            applications: page.items,
            total: page.total,
            page: page.page,
            total_pages,
        }
    }
}

/// Body of `PUT /applications/:id`; the status is parsed by the handler
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateStatusDto {
    #[validate(length(min = 1, max = 32, message = "Status is required"))]
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusResponseDto {
    pub success: bool,
    pub message: String,
    pub status: String,
    pub changed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_connection_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationStatsDto {
    pub total_applications: u64,
    pub new_applications: u64,
    pub pending_applications: u64,
    pub approved_applications: u64,
    pub rejected_applications: u64,
    pub total_loan_amount: Decimal,
    pub average_loan_amount: Decimal,
}

impl From<ApplicationStats> for ApplicationStatsDto {
    fn from(stats: ApplicationStats) -> Self {
        Self {
            total_applications: stats.total_applications,
            new_applications: stats.new_applications,
            pending_applications: stats.pending_applications,
            approved_applications: stats.approved_applications,
            rejected_applications: stats.rejected_applications,
            total_loan_amount: stats.total_loan_amount,
            average_loan_amount: stats.average_loan_amount,
        }
    }
}

/// Plain success acknowledgement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponseDto {
    pub success: bool,
    pub message: String,
}
