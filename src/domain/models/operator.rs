//! Operator Domain Model
//!
//! An admin user allowed to triage leads.

use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OperatorId(Uuid);

impl OperatorId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for OperatorId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for OperatorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Normalise a username the way it is stored: trimmed and lower-cased
#[must_use]
pub fn normalize_username(username: &str) -> String {
    username.trim().to_lowercase()
}

/// Operator account with an Argon2id password hash (PHC string format)
#[derive(Debug, Clone)]
pub struct Operator {
    id: OperatorId,
    username: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl Operator {
    #[must_use]
    pub fn new(username: &str, password_hash: String) -> Self {
        Self {
            id: OperatorId::new(),
            username: normalize_username(username),
            password_hash,
            created_at: Utc::now(),
        }
    }

    #[must_use]
    pub fn restore(id: OperatorId, username: String, password_hash: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            username,
            password_hash,
            created_at,
        }
    }

    #[must_use]
    pub fn id(&self) -> &OperatorId {
        &self.id
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    #[must_use]
    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
