//! Operator Credentials
//!
//! Argon2id password hashing and HS256 access tokens.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::config::JwtConfig;
use crate::domain::gateways::{AccessToken, CredentialHasher, TokenIssuer};
use crate::domain::models::operator::Operator;

pub const OPERATOR_ROLE: &str = "operator";

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (operator ID)
    pub sub: String,
    pub username: String,
    pub role: String,
    /// Issued at timestamp
    pub iat: i64,
    /// Expiration timestamp
    pub exp: i64,
}

/// Argon2id with the crate's default parameters
#[derive(Debug, Default, Clone, Copy)]
pub struct Argon2CredentialHasher;

impl CredentialHasher for Argon2CredentialHasher {
    fn hash(&self, password: &str) -> anyhow::Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| anyhow::anyhow!("argon2 hashing failed: {e}"))?;
        Ok(hash.to_string())
    }

    fn verify(&self, password: &str, hash: &str) -> bool {
        PasswordHash::new(hash)
            .map(|parsed| Argon2::default().verify_password(password.as_bytes(), &parsed).is_ok())
            .unwrap_or(false)
    }
}

/// Signs operator tokens with the configured shared secret
#[derive(Clone)]
pub struct JwtTokenIssuer {
    secret: String,
    expires_in_secs: i64,
}

impl JwtTokenIssuer {
    #[must_use]
    pub fn new(config: &JwtConfig) -> Self {
        Self {
            secret: config.secret.clone(),
            expires_in_secs: config.expires_in_secs,
        }
    }
}

impl TokenIssuer for JwtTokenIssuer {
    fn issue(&self, operator: &Operator) -> anyhow::Result<AccessToken> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: operator.id().to_string(),
            username: operator.username().to_string(),
            role: OPERATOR_ROLE.to_string(),
            iat: now,
            exp: now + self.expires_in_secs,
        };

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )?;

        Ok(AccessToken {
            token,
            expires_in: self.expires_in_secs,
        })
    }
}

/// Decode and validate an HS256 token, requiring a live `exp`
///
/// # Errors
///
/// Returns the `jsonwebtoken` error for bad signatures, malformed tokens or expiry.
pub fn decode_claims(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    // Pin the algorithm so a token cannot choose its own
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    validation.leeway = 60;

    decode::<Claims>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation).map(|data| data.claims)
}
