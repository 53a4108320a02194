//! Staff account management commands.
//!
//! Staff accounts are only ever created here; the admin service has no
//! self-registration endpoint.
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` - `PostgreSQL` connection string
//! - `STAFF_PASSWORD` - Password fallback when `--password` is omitted

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHasher, SaltString};
use argon2::Argon2;
use minimart_core::Email;
use secrecy::{ExposeSecret, SecretString};
use sqlx::PgPool;
use thiserror::Error;

const MIN_PASSWORD_LENGTH: usize = 8;

/// Errors that can occur during staff management.
#[derive(Debug, Error)]
pub enum StaffError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Invalid email address.
    #[error("Invalid email: {0}")]
    InvalidEmail(String),

    /// Invalid display name.
    #[error("Invalid name: {0}")]
    InvalidName(String),

    /// Password does not meet the minimum length.
    #[error("Password must be at least {MIN_PASSWORD_LENGTH} characters")]
    WeakPassword,

    /// No password given via flag or environment.
    #[error("No password given; pass --password or set STAFF_PASSWORD")]
    MissingPassword,

    /// Staff account already exists.
    #[error("Staff account already exists with email: {0}")]
    AccountExists(String),

    /// Password hashing failed.
    #[error("Password hashing failed")]
    PasswordHash,
}

/// Create a new staff account.
///
/// # Errors
///
/// Returns `StaffError` if validation fails, the email is already
/// registered, or the database is unreachable.
pub async fn create(email: &str, name: &str, password: Option<&str>) -> Result<(), StaffError> {
    dotenvy::dotenv().ok();

    let email =
        Email::parse(email).map_err(|_| StaffError::InvalidEmail(email.to_owned()))?;

    let name = name.trim();
    if name.is_empty() {
        return Err(StaffError::InvalidName("must not be empty".to_owned()));
    }

    let password = match password {
        Some(p) => SecretString::from(p.to_owned()),
        None => std::env::var("STAFF_PASSWORD")
            .map(SecretString::from)
            .map_err(|_| StaffError::MissingPassword)?,
    };
    if password.expose_secret().len() < MIN_PASSWORD_LENGTH {
        return Err(StaffError::WeakPassword);
    }

    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(password.expose_secret().as_bytes(), &salt)
        .map_err(|_| StaffError::PasswordHash)?
        .to_string();

    let database_url = std::env::var("DATABASE_URL")
        .map(SecretString::from)
        .map_err(|_| StaffError::MissingEnvVar("DATABASE_URL"))?;

    tracing::info!("Connecting to database...");
    let pool = PgPool::connect(database_url.expose_secret()).await?;

    let result = sqlx::query(
        r"
        INSERT INTO staff (name, email, password_hash)
        VALUES ($1, $2, $3)
        ",
    )
    .bind(name)
    .bind(email.as_str())
    .bind(&password_hash)
    .execute(&pool)
    .await;

    match result {
        Ok(_) => {
            tracing::info!("Staff account created: {} ({})", name, email);
            Ok(())
        }
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
            Err(StaffError::AccountExists(email.as_str().to_owned()))
        }
        Err(e) => Err(e.into()),
    }
}
