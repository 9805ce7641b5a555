//! Password hashing and verification utilities
//!
//! Uses Argon2id for secure password hashing (OWASP recommended). Accounts
//! created without a password get an *unusable* marker instead of a hash:
//! a `!` followed by random characters, which never verifies.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::{distributions::Alphanumeric, Rng};

use crate::error::AppError;

/// Prefix that marks a stored password as unusable
pub const UNUSABLE_PASSWORD_PREFIX: &str = "!";

const UNUSABLE_PASSWORD_SUFFIX_LENGTH: usize = 40;

/// Hash a password using Argon2id
///
/// # Errors
/// Returns an error if hashing fails
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing failed: {e}")))
}

/// Verify a password against a stored value
///
/// Unusable markers never match.
///
/// # Errors
/// Returns an error if the stored value is neither a marker nor a valid hash
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    if !is_password_usable(hash) {
        return Ok(false);
    }

    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Invalid password hash format: {e}")))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Generate a value that can be stored as a password but never matches
pub fn make_unusable_password() -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(UNUSABLE_PASSWORD_SUFFIX_LENGTH)
        .map(char::from)
        .collect();
    format!("{UNUSABLE_PASSWORD_PREFIX}{suffix}")
}

/// Check whether a stored value is a real hash
#[inline]
pub fn is_password_usable(stored: &str) -> bool {
    !stored.starts_with(UNUSABLE_PASSWORD_PREFIX)
}

/// Password service for dependency injection
#[derive(Debug, Clone, Default)]
pub struct PasswordService;

impl PasswordService {
    /// Create a new password service
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Produce the stored value for an optional raw password
    ///
    /// # Errors
    /// Returns an error if hashing fails
    pub fn make(&self, password: Option<&str>) -> Result<String, AppError> {
        match password {
            Some(raw) => hash_password(raw),
            None => Ok(make_unusable_password()),
        }
    }

    /// Verify a password against a stored value
    ///
    /// # Errors
    /// Returns an error if the stored value is malformed
    pub fn verify(&self, password: &str, stored: &str) -> Result<bool, AppError> {
        verify_password(password, stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_password() {
        let password = "SecurePassword123!";
        let hash = hash_password(password).unwrap();

        // Hash should start with argon2 identifier
        assert!(hash.starts_with("$argon2"));
        assert_ne!(hash, password);
        // Hash should be different each time (different salt)
        let hash2 = hash_password(password).unwrap();
        assert_ne!(hash, hash2);
    }

    #[test]
    fn test_verify_password() {
        let hash = hash_password("SecurePassword123!").unwrap();

        assert!(verify_password("SecurePassword123!", &hash).unwrap());
        assert!(!verify_password("WrongPassword123!", &hash).unwrap());
    }

    #[test]
    fn test_unusable_password_never_matches() {
        let marker = make_unusable_password();
        assert!(marker.starts_with(UNUSABLE_PASSWORD_PREFIX));
        assert_eq!(marker.len(), 1 + UNUSABLE_PASSWORD_SUFFIX_LENGTH);
        assert!(!is_password_usable(&marker));
        assert!(!verify_password("", &marker).unwrap());
        assert!(!verify_password(&marker, &marker).unwrap());
    }

    #[test]
    fn test_unusable_markers_are_random() {
        assert_ne!(make_unusable_password(), make_unusable_password());
    }

    #[test]
    fn test_malformed_hash_is_an_error() {
        assert!(verify_password("x", "not-a-phc-string").is_err());
    }

    #[test]
    fn test_password_service_make() {
        let service = PasswordService::new();

        let stored = service.make(Some("hunter2")).unwrap();
        assert!(is_password_usable(&stored));
        assert!(service.verify("hunter2", &stored).unwrap());

        let stored = service.make(None).unwrap();
        assert!(!is_password_usable(&stored));
        assert!(!service.verify("hunter2", &stored).unwrap());
    }
}
