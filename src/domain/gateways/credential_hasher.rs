//! Credential Hasher Gateway
//!
//! One-way password hashing for operator accounts.

#[cfg_attr(test, mockall::automock)]
pub trait CredentialHasher: Send + Sync {
    /// Hash a plaintext password into a self-describing hash string
    fn hash(&self, password: &str) -> anyhow::Result<String>;

    /// Whether `password` matches `hash`. Malformed hashes never match.
    fn verify(&self, password: &str, hash: &str) -> bool;
}
