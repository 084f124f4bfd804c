//! Credential hashing and verification using Argon2id.

use argon2::password_hash::SaltString;
use argon2::password_hash::rand_core::OsRng;
use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use anyhow::anyhow;

use crate::error::IdentityServiceError;

/// Hash a plaintext password into a PHC-format Argon2id string.
pub fn hash_password(password: &str) -> Result<String, IdentityServiceError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| IdentityServiceError::Internal(anyhow!("password hashing: {e}")))?;
    Ok(hash.to_string())
}

/// Verify a plaintext password against a stored PHC-format hash.
///
/// Returns `Ok(true)` on match, `Ok(false)` on mismatch, or `Internal` if the
/// stored hash is malformed.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, IdentityServiceError> {
    let parsed_hash = argon2::PasswordHash::new(hash)
        .map_err(|e| IdentityServiceError::Internal(anyhow!("invalid hash format: {e}")))?;

    let argon2 = Argon2::default();
    match argon2.verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(IdentityServiceError::Internal(anyhow!("verify error: {e}"))),
    }
}
