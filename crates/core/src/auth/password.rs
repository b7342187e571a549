//! Argon2id password storage.
//!
//! Hashes are stored as PHC strings. A stored value that is not a PHC string
//! (old demo rows kept the plaintext) is reported as `UnrecognizedHash` and
//! never verifies.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{self, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Argon2, PasswordHash};
use thiserror::Error;

/// Failure while hashing or checking a password.
#[derive(Debug, Error)]
pub enum PasswordError {
    /// Argon2 could not produce a hash.
    #[error("password hashing failed: {0}")]
    Hashing(String),

    /// Argon2 failed for a reason other than a mismatch.
    #[error("password check failed: {0}")]
    Verification(String),

    /// The stored value is not a PHC string.
    #[error("stored password is not a recognized hash")]
    UnrecognizedHash,
}

fn hasher() -> Argon2<'static> {
    Argon2::default()
}

/// Hashes `password` with a fresh random salt.
///
/// # Errors
///
/// `Hashing` when argon2 rejects the input.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    hasher()
        .hash_password(password.as_bytes(), &salt)
        .map(|phc| phc.to_string())
        .map_err(|e| PasswordError::Hashing(e.to_string()))
}

/// Checks `password` against a stored PHC string. A mismatch is `Ok(false)`.
///
/// # Errors
///
/// `UnrecognizedHash` when `stored` does not parse, `Verification` for any
/// other argon2 failure.
pub fn verify_password(password: &str, stored: &str) -> Result<bool, PasswordError> {
    let phc = PasswordHash::new(stored).map_err(|_| PasswordError::UnrecognizedHash)?;

    match hasher().verify_password(password.as_bytes(), &phc) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(e) => Err(PasswordError::Verification(e.to_string())),
    }
}
