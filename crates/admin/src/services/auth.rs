//! Staff authentication.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sqlx::PgPool;
use thiserror::Error;

use crate::db::{RepositoryError, StaffRepository};
use crate::models::Staff;

/// Minimum password length.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Errors that can occur during staff authentication.
#[derive(Debug, Error)]
pub enum StaffAuthError {
    /// Invalid credentials (wrong password or unknown email).
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Password too weak or invalid.
    #[error("password validation failed: {0}")]
    WeakPassword(String),

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,
}

/// Staff authentication service.
pub struct StaffAuthService<'a> {
    staff: StaffRepository<'a>,
}

impl<'a> StaffAuthService<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            staff: StaffRepository::new(pool),
        }
    }

    /// Login with email and password.
    ///
    /// # Errors
    ///
    /// Returns `StaffAuthError::InvalidCredentials` if the email/password
    /// is wrong.
    pub async fn login(&self, email: &str, password: &str) -> Result<Staff, StaffAuthError> {
        let staff = self
            .staff
            .find_by_email(email.trim())
            .await?
            .ok_or(StaffAuthError::InvalidCredentials)?;

        verify_password(password, &staff.password_hash)?;

        Ok(staff)
    }
}

/// Validate password meets requirements.
///
/// # Errors
///
/// Returns `StaffAuthError::WeakPassword` when the password is too short.
pub fn validate_password(password: &str) -> Result<(), StaffAuthError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(StaffAuthError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Hash a password using Argon2id. Used here and by the CLI when
/// provisioning staff accounts.
///
/// # Errors
///
/// Returns `StaffAuthError::PasswordHash` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, StaffAuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| StaffAuthError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), StaffAuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| StaffAuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| StaffAuthError::InvalidCredentials)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_password_length() {
        assert!(validate_password("short").is_err());
        assert!(validate_password("longenough").is_ok());
    }

    #[test]
    fn test_hash_and_verify_roundtrip() {
        let hash = hash_password("stockroom keys").unwrap();
        assert!(verify_password("stockroom keys", &hash).is_ok());
        assert!(verify_password("wrong", &hash).is_err());
    }
}
