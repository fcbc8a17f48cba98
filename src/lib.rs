//! Loan Lead Registry
//!
//! Intake and triage service for short-term loan applications, following
//! Clean/Hexagonal Architecture principles, plus an operator dashboard client.

pub mod application;
pub mod dashboard;
pub mod domain;
pub mod infrastructure;
pub mod shared;
