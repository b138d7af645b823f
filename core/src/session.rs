// printshop_core/src/session.rs

//! Stateless session tokens.
//!
//! A token is an HS256 JWT over [`Claims`]. Nothing is stored server-side, so
//! there is no revocation: a token stays valid until `exp` even after the
//! user changes their password.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

use crate::clock::Clock;
use crate::error::SessionError;
use crate::order::UserId;

pub const SESSION_TTL_HOURS: i64 = 24;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
  pub sub: UserId,
  pub email: String,
  /// Seconds since the Unix epoch.
  pub iat: i64,
  pub exp: i64,
}

/// The identity carried by a verified token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
  pub user_id: UserId,
  pub email: String,
}

pub struct SessionIssuer {
  encoding_key: EncodingKey,
  decoding_key: DecodingKey,
  validation: Validation,
  ttl: Duration,
  clock: Arc<dyn Clock>,
}

impl fmt::Debug for SessionIssuer {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("SessionIssuer")
      .field("ttl", &self.ttl)
      .field("secret", &"[REDACTED]")
      .finish()
  }
}

impl SessionIssuer {
  /// `secret` is the process-wide signing key, read once at startup.
  pub fn new(secret: &[u8], clock: Arc<dyn Clock>) -> Result<Self, SessionError> {
    if secret.is_empty() {
      return Err(SessionError::InvalidKey("signing secret must not be empty".to_string()));
    }

    let mut validation = Validation::new(Algorithm::HS256);
    // Expiry is checked against `clock` in `verify`.
    validation.validate_exp = false;
    validation.leeway = 0;
    validation.set_required_spec_claims(&["exp", "sub"]);

    Ok(Self {
      encoding_key: EncodingKey::from_secret(secret),
      decoding_key: DecodingKey::from_secret(secret),
      validation,
      ttl: Duration::hours(SESSION_TTL_HOURS),
      clock,
    })
  }

  pub fn ttl(&self) -> Duration {
    self.ttl
  }

  #[instrument(name = "session::issue", skip(self, email), fields(user_id = %user_id))]
  pub fn issue(&self, user_id: UserId, email: &str) -> Result<String, SessionError> {
    let issued_at = self.clock.now();
    let claims = Claims {
      sub: user_id,
      email: email.to_string(),
      iat: issued_at.timestamp(),
      exp: expiry_seconds(issued_at + self.ttl),
    };

    let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
      .map_err(|e| SessionError::Signing(e.to_string()))?;
    debug!(exp = claims.exp, "Session token issued.");
    Ok(token)
  }

  /// Accepts the token iff it is well formed, carries our signature and
  /// `now < exp`.
  #[instrument(name = "session::verify", skip_all)]
  pub fn verify(&self, token: &str) -> Result<Principal, SessionError> {
    if token.trim().is_empty() {
      return Err(SessionError::Unauthenticated("Missing session token".to_string()));
    }

    let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
      match e.kind() {
        ErrorKind::InvalidToken
        | ErrorKind::Base64(_)
        | ErrorKind::Json(_)
        | ErrorKind::Utf8(_)
        | ErrorKind::MissingRequiredClaim(_) => {
          debug!(error = %e, "Rejected malformed session token.");
          SessionError::Unauthenticated("Malformed session token".to_string())
        }
        _ => {
          warn!(error = %e, "Rejected session token with bad signature.");
          SessionError::Forbidden("Invalid session token".to_string())
        }
      }
    })?;

    let now = self.clock.now().timestamp();
    if now >= data.claims.exp {
      debug!(user_id = %data.claims.sub, exp = data.claims.exp, now, "Rejected expired session token.");
      return Err(SessionError::Forbidden("Session token has expired".to_string()));
    }

    Ok(Principal {
      user_id: data.claims.sub,
      email: data.claims.email,
    })
  }
}

/// `exp` is whole seconds; round up so a token never lives shorter than the TTL.
fn expiry_seconds(expires_at: DateTime<Utc>) -> i64 {
  let secs = expires_at.timestamp();
  if expires_at.timestamp_subsec_nanos() > 0 {
    secs + 1
  } else {
    secs
  }
}
