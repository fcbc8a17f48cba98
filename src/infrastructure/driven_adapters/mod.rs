//! Driven Adapters
//!
//! Implementations of gateway traits for external systems:
//! - Database repositories
//! - Configuration
//! - Credential hashing and token signing

pub mod application_repository;
pub mod bank_connection_repository;
pub mod config;
pub mod database;
pub mod operator_repository;
pub mod security;

pub use application_repository::PostgresApplicationRepository;
pub use bank_connection_repository::PostgresBankConnectionRepository;
pub use config::AppConfig;
pub use database::RecordStore;
pub use operator_repository::PostgresOperatorRepository;
pub use security::{Argon2CredentialHasher, JwtTokenIssuer};
