// print_shop/src/services/auth_service.rs

//! Password hashing and verification.
//!
//! Both operations are slow and CPU-bound. Async callers run them
//! through [`hash_password_blocking`] / [`verify_password_blocking`], which move
//! the work onto actix's blocking pool.

use crate::errors::AppError; // Application-specific error type
use actix_web::web;
use argon2::{
  password_hash::{
    rand_core::OsRng, // For generating random salts
    PasswordHash,
    PasswordHasher,   // The main trait for hashing
    PasswordVerifier, // The main trait for verifying
    SaltString,
  },
  Argon2, // The Argon2 algorithm instance
};
use std::sync::OnceLock;
use tracing::{debug, error, instrument};

/// Hashes a plain-text password using Argon2 with a fresh random salt.
///
/// Returns the PHC string (algorithm, parameters, salt and hash) to be stored as-is.
#[instrument(name = "auth_service::hash_password", skip(password), err(Display))]
pub fn hash_password(password: &str) -> Result<String, AppError> {
  if password.is_empty() {
    return Err(AppError::Validation("Password cannot be empty.".to_string()));
  }

  let salt = SaltString::generate(&mut OsRng);
  let argon2_hasher = Argon2::default();

  match argon2_hasher.hash_password(password.as_bytes(), &salt) {
    Ok(password_hash_obj) => {
      debug!("Password hashed successfully.");
      Ok(password_hash_obj.to_string())
    }
    Err(argon_err) => {
      error!(error = %argon_err, "Argon2 password hashing failed.");
      Err(AppError::Internal(format!("Password hashing process failed: {}", argon_err)))
    }
  }
}

/// Verifies a plain-text password against a stored Argon2 hash.
///
/// `Ok(false)` means a clean mismatch. An unparsable stored hash is an internal error.
#[instrument(name = "auth_service::verify_password", skip_all, err(Display))]
pub fn verify_password(hashed_password_str: &str, provided_password: &str) -> Result<bool, AppError> {
  let parsed_hash = PasswordHash::new(hashed_password_str).map_err(|parse_err| {
    error!(error = %parse_err, "Failed to parse stored password hash string.");
    AppError::Internal(format!("Invalid stored password hash format: {}", parse_err))
  })?;

  match Argon2::default().verify_password(provided_password.as_bytes(), &parsed_hash) {
    Ok(()) => Ok(true),
    Err(argon2::password_hash::Error::Password) => {
      debug!("Password verification failed: Passwords do not match.");
      Ok(false)
    }
    Err(other_argon_err) => {
      error!(error = %other_argon_err, "Argon2 password verification process encountered an error.");
      Err(AppError::Internal(format!(
        "Password verification process failed: {}",
        other_argon_err
      )))
    }
  }
}

/// A valid hash of a throwaway password. Verifying against it when the email is
/// unknown makes that failure cost the same as a wrong password.
fn dummy_hash() -> Result<&'static str, AppError> {
  static DUMMY: OnceLock<String> = OnceLock::new();
  if let Some(hash) = DUMMY.get() {
    return Ok(hash.as_str());
  }
  let hash = hash_password("printshop-timing-equalizer")?;
  Ok(DUMMY.get_or_init(|| hash).as_str())
}

pub async fn hash_password_blocking(password: String) -> Result<String, AppError> {
  web::block(move || hash_password(&password)).await?
}

/// `stored_hash = None` runs the comparison against the dummy hash and always yields `false`.
pub async fn verify_password_blocking(stored_hash: Option<String>, password: String) -> Result<bool, AppError> {
  web::block(move || match stored_hash {
    Some(hash) => verify_password(&hash, &password),
    None => verify_password(dummy_hash()?, &password).map(|_| false),
  })
  .await?
}
