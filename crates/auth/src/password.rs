//! Salted argon2 password hashing.
//!
//! Hashes are stored in PHC string form, so the salt and parameters travel with
//! the hash.

use std::sync::OnceLock;

use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use rand::rngs::OsRng;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PasswordError {
    #[error("failed to hash password: {0}")]
    Hash(String),

    #[error("password task failed: {0}")]
    Task(String),
}

/// Password hashing and verification. Implementations are CPU-bound and
/// blocking; call them off the async executor.
pub trait PasswordScheme: Send + Sync {
    fn hash(&self, password: &str) -> Result<String, PasswordError>;

    fn verify(&self, password: &str, hash: &str) -> bool;

    /// Spends the same work as [`PasswordScheme::verify`] against a throwaway
    /// hash. Used when there is no stored hash to check. Always `false`.
    fn verify_dummy(&self, password: &str) -> bool;
}

/// argon2id with default parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2Scheme;

impl PasswordScheme for Argon2Scheme {
    fn hash(&self, password: &str) -> Result<String, PasswordError> {
        hash_password(password)
    }

    fn verify(&self, password: &str, hash: &str) -> bool {
        verify_password(password, hash)
    }

    fn verify_dummy(&self, password: &str) -> bool {
        if let Some(hash) = dummy_hash() {
            let _ = verify_password(password, hash);
        }
        false
    }
}

fn dummy_hash() -> Option<&'static str> {
    static DUMMY: OnceLock<Option<String>> = OnceLock::new();
    DUMMY
        .get_or_init(|| hash_password("summer-dummy-password").ok())
        .as_deref()
}

pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| PasswordError::Hash(e.to_string()))
}

/// `false` for a wrong password and for a stored value that is not a PHC hash.
pub fn verify_password(password: &str, hash: &str) -> bool {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(h) => h,
        Err(_) => return false,
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}
