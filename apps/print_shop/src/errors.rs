// print_shop/src/errors.rs

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use printshop_core::{SessionError, TransitionError};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Validation Error: {0}")]
  Validation(String),

  /// Missing or malformed credentials on the request.
  #[error("Unauthenticated: {0}")]
  Unauthenticated(String),

  /// Credentials present but not acceptable (bad signature, expired token, wrong shop key).
  #[error("Forbidden: {0}")]
  Forbidden(String),

  /// Email/password check failed. The message never says which half was wrong.
  #[error("Authentication Failed: {0}")]
  InvalidCredentials(String),

  /// Missing, not owned by the caller, or not in an editable state.
  #[error("Resource Not Found: {0}")]
  NotFound(String),

  #[error("Conflict: {0}")]
  Conflict(String),

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Database Error: {0}")]
  Sqlx(#[from] sqlx::Error),

  #[error("Internal Server Error: {0}")]
  Internal(String),
}

impl From<SessionError> for AppError {
  fn from(err: SessionError) -> Self {
    match err {
      SessionError::Unauthenticated(m) => AppError::Unauthenticated(m),
      SessionError::Forbidden(m) => AppError::Forbidden(m),
      SessionError::InvalidKey(m) => AppError::Config(m),
      SessionError::Signing(m) => AppError::Internal(m),
    }
  }
}

impl From<TransitionError> for AppError {
  fn from(err: TransitionError) -> Self {
    AppError::Validation(err.to_string())
  }
}

impl From<actix_multipart::MultipartError> for AppError {
  fn from(err: actix_multipart::MultipartError) -> Self {
    AppError::Validation(format!("Invalid multipart payload: {}", err))
  }
}

impl From<actix_web::error::BlockingError> for AppError {
  fn from(err: actix_web::error::BlockingError) -> Self {
    AppError::Internal(format!("Blocking task failed: {}", err))
  }
}

impl From<anyhow::Error> for AppError {
  fn from(err: anyhow::Error) -> Self {
    AppError::Internal(format!("{:#}", err))
  }
}

impl ResponseError for AppError {
  fn status_code(&self) -> StatusCode {
    match self {
      AppError::Validation(_) => StatusCode::BAD_REQUEST,
      AppError::Unauthenticated(_) | AppError::InvalidCredentials(_) => StatusCode::UNAUTHORIZED,
      AppError::Forbidden(_) => StatusCode::FORBIDDEN,
      AppError::NotFound(_) => StatusCode::NOT_FOUND,
      AppError::Conflict(_) => StatusCode::CONFLICT,
      AppError::Config(_) | AppError::Sqlx(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    let status = self.status_code();
    if status.is_server_error() {
      tracing::error!(application_error = %self, "Responding with error");
    } else {
      tracing::debug!(application_error = %self, status = status.as_u16(), "Responding with client error");
    }

    // Server-side details stay in the logs.
    let message = match self {
      AppError::Validation(m)
      | AppError::Unauthenticated(m)
      | AppError::Forbidden(m)
      | AppError::InvalidCredentials(m)
      | AppError::NotFound(m)
      | AppError::Conflict(m) => m.as_str(),
      AppError::Config(_) => "Configuration issue",
      AppError::Sqlx(_) => "Database operation failed",
      AppError::Internal(_) => "An internal error occurred",
    };
    HttpResponse::build(status).json(json!({ "message": message }))
  }
}

// Define a Result type alias for the application
pub type Result<T, E = AppError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn session_errors_keep_their_class() {
    let unauth: AppError = SessionError::Unauthenticated("x".into()).into();
    let forbidden: AppError = SessionError::Forbidden("y".into()).into();
    assert_eq!(unauth.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(forbidden.status_code(), StatusCode::FORBIDDEN);
  }

  #[test]
  fn database_errors_are_redacted() {
    let err = AppError::Sqlx(sqlx::Error::PoolTimedOut);
    let response = err.error_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
  }

  #[test]
  fn conflict_maps_to_409() {
    assert_eq!(AppError::Conflict("dup".into()).status_code(), StatusCode::CONFLICT);
  }
}
