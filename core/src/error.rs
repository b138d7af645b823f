// printshop_core/src/error.rs
use thiserror::Error;

use crate::order::OrderStatus;

/// Failures of session token issuance and verification.
///
/// A token that cannot be parsed is `Unauthenticated`. A token that parses but
/// fails the signature or expiry check is `Forbidden`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
  #[error("Unauthenticated: {0}")]
  Unauthenticated(String),

  #[error("Forbidden: {0}")]
  Forbidden(String),

  #[error("Invalid session signing key: {0}")]
  InvalidKey(String),

  #[error("Session token could not be signed: {0}")]
  Signing(String),
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("Order cannot move from '{from}' to '{to}'")]
pub struct TransitionError {
  pub from: OrderStatus,
  pub to: OrderStatus,
}
