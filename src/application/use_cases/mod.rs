//! Use Cases
//!
//! Application-specific business rules.
//! Each use case is a single-purpose struct with an execute() method.

pub mod applications;
pub mod auth;
pub mod bank_connections;
pub mod health;

pub use applications::{
    DeleteApplicationUseCase, GetApplicationByIdUseCase, GetApplicationStatsUseCase, ListApplicationsUseCase,
    StatusChange, SubmitApplicationUseCase, UpdateApplicationStatusUseCase,
};
pub use auth::{LoginOperatorUseCase, RegisterOperatorUseCase};
pub use bank_connections::{CreateBankConnectionUseCase, DeleteBankConnectionUseCase, ListBankConnectionsUseCase};
pub use health::CheckStoreHealthUseCase;
