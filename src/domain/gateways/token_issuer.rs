//! Token Issuer Gateway
//!
//! Issues bearer tokens for authenticated operators.

use crate::domain::models::operator::Operator;

/// A signed bearer token and its lifetime in seconds
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
    pub token: String,
    pub expires_in: i64,
}

#[cfg_attr(test, mockall::automock)]
pub trait TokenIssuer: Send + Sync {
    fn issue(&self, operator: &Operator) -> anyhow::Result<AccessToken>;
}
