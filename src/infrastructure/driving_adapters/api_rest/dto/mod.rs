//! Data Transfer Objects
//!
//! Request and response DTOs for the REST API.

pub mod application;
pub mod auth;
pub mod bank_connection;
pub mod health;
pub mod pagination;

pub use application::{
    ApplicationListResponseDto, ApplicationResponseDto, ApplicationStatsDto, MessageResponseDto,
    SubmitApplicationDto, SubmitApplicationResponseDto, UpdateStatusDto, UpdateStatusResponseDto,
};
pub use auth::{LoginDto, LoginResponseDto};
pub use bank_connection::{
    BankConnectionListResponseDto, BankConnectionResponseDto, CreateBankConnectionDto,
    CreateBankConnectionResponseDto,
};
pub use health::HealthResponseDto;
pub use pagination::ListQueryDto;
