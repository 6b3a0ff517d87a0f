//! Password hashing using Argon2id.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("hashing failed: {0}")]
    Hash(String),

    #[error("verification failed: {0}")]
    Verify(String),

    #[error("hashing worker failed: {0}")]
    Worker(String),
}

/// Hash a plaintext password into an Argon2id PHC string with a random salt.
pub fn hash_password(password: &str) -> Result<String, CredentialError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| CredentialError::Hash(e.to_string()))
}

/// Check a plaintext password against a stored credential.
///
/// Stored values that are not PHC strings are legacy plaintext records and
/// must match exactly.
pub fn verify_password(password: &str, stored: &str) -> Result<bool, CredentialError> {
    let parsed = match PasswordHash::new(stored) {
        Ok(parsed) => parsed,
        Err(_) => return Ok(stored == password),
    };

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(CredentialError::Verify(e.to_string())),
    }
}

/// Runs `hash_password` off the async runtime.
pub async fn hash_password_blocking(password: String) -> Result<String, CredentialError> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| CredentialError::Worker(e.to_string()))?
}

/// Runs `verify_password` off the async runtime.
pub async fn verify_password_blocking(
    password: String,
    stored: String,
) -> Result<bool, CredentialError> {
    tokio::task::spawn_blocking(move || verify_password(&password, &stored))
        .await
        .map_err(|e| CredentialError::Worker(e.to_string()))?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correct_password_matches() {
        let hash = hash_password("hunter2").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("hunter2", &hash).unwrap());
    }

    #[test]
    fn wrong_password_does_not_match() {
        let hash = hash_password("hunter2").unwrap();
        assert!(!verify_password("Hunter2", &hash).unwrap());
    }

    #[test]
    fn salts_differ_between_hashes() {
        assert_ne!(
            hash_password("same").unwrap(),
            hash_password("same").unwrap()
        );
    }

    #[test]
    fn legacy_plaintext_compares_exactly() {
        assert!(verify_password("secret", "secret").unwrap());
        assert!(!verify_password("Secret", "secret").unwrap());
        assert!(!verify_password("", "secret").unwrap());
    }
}
