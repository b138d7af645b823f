// print_shop/src/services/credential_service.rs

//! The credential store: registration, credential checks, password changes
//! and profile edits.

use printshop_core::UserId;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::db::UserRepository;
use crate::errors::{AppError, Result};
use crate::models::{NewUser, User};
use crate::services::auth_service;

/// The one message for every failed login, so callers cannot tell an unknown
/// email from a wrong password.
pub const INVALID_LOGIN_MESSAGE: &str = "Invalid email or password";

#[derive(Debug, Clone)]
pub struct Registration {
  pub name: String,
  pub email: String,
  pub password: String,
  pub phone: Option<String>,
}

impl Registration {
  pub fn validate(&self) -> Result<()> {
    if self.name.trim().is_empty() {
      return Err(AppError::Validation("Name is required.".to_string()));
    }
    validate_email(&self.email)?;
    if self.password.is_empty() {
      return Err(AppError::Validation("Password is required.".to_string()));
    }
    Ok(())
  }
}

pub(crate) fn validate_email(email: &str) -> Result<()> {
  if email.trim().is_empty() || !email.contains('@') {
    return Err(AppError::Validation("Valid email is required.".to_string()));
  }
  Ok(())
}

/// Blank optional text counts as absent.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
  value.filter(|v| !v.trim().is_empty())
}

#[derive(Clone)]
pub struct CredentialService {
  users: Arc<dyn UserRepository>,
}

impl CredentialService {
  pub fn new(users: Arc<dyn UserRepository>) -> Self {
    Self { users }
  }

  /// Hashes the password and inserts the user in one statement. A duplicate
  /// email surfaces from the store as `AppError::Conflict`.
  #[instrument(name = "credentials::register", skip_all, fields(email = %registration.email))]
  pub async fn register(&self, registration: Registration) -> Result<User> {
    registration.validate()?;
    let Registration {
      name,
      email,
      password,
      phone,
    } = registration;

    let password_hash = auth_service::hash_password_blocking(password).await?;
    let user = self
      .users
      .insert_user(NewUser {
        name: name.trim().to_string(),
        email,
        password_hash,
        phone: non_blank(phone),
      })
      .await?;

    info!(user_id = %user.id, "User registered.");
    Ok(user)
  }

  #[instrument(name = "credentials::verify", skip(self, password))]
  pub async fn verify(&self, email: &str, password: &str) -> Result<User> {
    let user = self.users.find_user_by_email(email).await?;
    let stored_hash = user.as_ref().map(|u| u.password_hash.clone());

    let matches = auth_service::verify_password_blocking(stored_hash, password.to_string()).await?;
    match (user, matches) {
      (Some(user), true) => {
        info!(user_id = %user.id, "Credentials verified.");
        Ok(user)
      }
      _ => {
        warn!("Login rejected.");
        Err(AppError::InvalidCredentials(INVALID_LOGIN_MESSAGE.to_string()))
      }
    }
  }

  #[instrument(name = "credentials::change_password", skip(self, current_password, new_password))]
  pub async fn change_password(&self, user_id: UserId, current_password: &str, new_password: &str) -> Result<()> {
    let user = self
      .users
      .find_user_by_id(user_id)
      .await?
      .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let matches =
      auth_service::verify_password_blocking(Some(user.password_hash), current_password.to_string()).await?;
    if !matches {
      warn!("Password change rejected: current password mismatch.");
      return Err(AppError::InvalidCredentials("Current password is incorrect".to_string()));
    }
    if new_password.is_empty() {
      return Err(AppError::Validation("New password is required.".to_string()));
    }

    let new_hash = auth_service::hash_password_blocking(new_password.to_string()).await?;
    if !self.users.update_password_hash(user_id, &new_hash).await? {
      return Err(AppError::NotFound("User not found".to_string()));
    }
    // Previously issued session tokens remain valid until they expire.
    info!("Password changed.");
    Ok(())
  }

  /// Overwrites name and phone. The email cannot be changed here.
  #[instrument(name = "credentials::update_profile", skip(self, name, phone))]
  pub async fn update_profile(&self, user_id: UserId, name: &str, phone: Option<String>) -> Result<()> {
    let phone = non_blank(phone);
    let updated = self.users.update_profile(user_id, name.trim(), phone.as_deref()).await?;
    if !updated {
      warn!("Profile update matched no user row.");
    }
    Ok(())
  }

  pub async fn profile(&self, user_id: UserId) -> Result<User> {
    self
      .users
      .find_user_by_id(user_id)
      .await?
      .ok_or_else(|| AppError::NotFound("User not found".to_string()))
  }
}
