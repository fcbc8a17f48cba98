//! Domain Models
//!
//! Pure domain entities and value objects representing business concepts.

pub mod application;
pub mod bank_connection;
pub mod operator;
pub mod pagination;
pub mod stats;

pub use application::{
    ApplicantProfile, ApplicationId, ApplicationStatus, BankAccountType, EmploymentStatus, FinancialProfile,
    LoanApplication, RequestMetadata, SubmitApplicationData,
};
pub use bank_connection::{BankConnection, BankConnectionId, CreateBankConnectionData};
pub use operator::{Operator, OperatorId};
pub use pagination::{Page, PageRequest};
pub use stats::{ApplicationStats, StatusTotal};
