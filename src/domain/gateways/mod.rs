//! Gateway Traits (Ports)
//!
//! Abstract interfaces defining contracts for external dependencies.
//! These are implemented by driven adapters in the infrastructure layer.

pub mod application_repository;
pub mod bank_connection_repository;
pub mod credential_hasher;
pub mod operator_repository;
pub mod store_health;
pub mod token_issuer;

pub use application_repository::{ApplicationQuery, ApplicationRepository};
pub use bank_connection_repository::{BankConnectionQuery, BankConnectionRepository};
pub use credential_hasher::CredentialHasher;
pub use operator_repository::OperatorRepository;
pub use store_health::StoreHealth;
pub use token_issuer::{AccessToken, TokenIssuer};
