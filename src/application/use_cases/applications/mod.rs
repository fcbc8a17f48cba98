//! Loan Application Use Cases
//!
//! Intake, triage and reporting over submitted leads.

mod delete_application;
mod get_application_by_id;
mod get_application_stats;
mod list_applications;
mod submit_application;
mod update_application_status;

pub use delete_application::DeleteApplicationUseCase;
pub use get_application_by_id::GetApplicationByIdUseCase;
pub use get_application_stats::GetApplicationStatsUseCase;
pub use list_applications::ListApplicationsUseCase;
pub use submit_application::SubmitApplicationUseCase;
pub use update_application_status::{StatusChange, UpdateApplicationStatusUseCase};
