// print_shop/src/web/extractors.rs

//! Request extractors for the two kinds of caller identity: a customer with a
//! bearer session token, and the shop with its API key.

use actix_web::{dev::Payload, http::header, web, FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};
use printshop_core::UserId;
use tracing::debug;

use crate::errors::AppError;
use crate::state::AppState;

pub const SHOP_KEY_HEADER: &str = "X-Shop-Key";

fn app_state(req: &HttpRequest) -> Result<&web::Data<AppState>, AppError> {
  req
    .app_data::<web::Data<AppState>>()
    .ok_or_else(|| AppError::Internal("Application state is not configured".to_string()))
}

/// A customer whose `Authorization: Bearer <token>` header verified.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
  pub user_id: UserId,
  pub email: String,
}

/// Pulls the token out of an `Authorization` header value; `None` unless the
/// scheme is `Bearer` and a token follows.
pub fn bearer_token(header_value: &str) -> Option<&str> {
  let (scheme, token) = header_value.trim().split_once(' ')?;
  let token = token.trim();
  (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

impl AuthenticatedUser {
  fn extract(req: &HttpRequest) -> Result<Self, AppError> {
    let state = app_state(req)?;
    let header_value = req
      .headers()
      .get(header::AUTHORIZATION)
      .ok_or_else(|| AppError::Unauthenticated("Unauthorized".to_string()))?
      .to_str()
      .map_err(|_| AppError::Unauthenticated("Unauthorized".to_string()))?;
    let token = bearer_token(header_value).ok_or_else(|| {
      debug!("Authorization header is not a bearer token.");
      AppError::Unauthenticated("Unauthorized".to_string())
    })?;

    let principal = state.sessions.verify(token)?;
    Ok(AuthenticatedUser {
      user_id: principal.user_id,
      email: principal.email,
    })
  }
}

impl FromRequest for AuthenticatedUser {
  type Error = AppError;
  type Future = Ready<Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
    ready(Self::extract(req))
  }
}

/// The shop itself, identified by the configured `SHOP_API_KEY`.
///
/// With no key configured the shop routes do not exist as far as callers can tell.
#[derive(Debug, Clone, Copy)]
pub struct ShopAccess;

impl ShopAccess {
  fn extract(req: &HttpRequest) -> Result<Self, AppError> {
    let state = app_state(req)?;
    let expected = state
      .config
      .shop_api_key
      .as_deref()
      .ok_or_else(|| AppError::NotFound("Not found".to_string()))?;

    let provided = req
      .headers()
      .get(SHOP_KEY_HEADER)
      .and_then(|v| v.to_str().ok())
      .ok_or_else(|| AppError::Unauthenticated("Missing shop key".to_string()))?;

    if constant_time_eq(provided.as_bytes(), expected.as_bytes()) {
      Ok(ShopAccess)
    } else {
      Err(AppError::Forbidden("Invalid shop key".to_string()))
    }
  }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
  a.len() == b.len() && a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

impl FromRequest for ShopAccess {
  type Error = AppError;
  type Future = Ready<Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
    ready(Self::extract(req))
  }
}
