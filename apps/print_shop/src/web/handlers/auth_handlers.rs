// print_shop/src/web/handlers/auth_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize; // For request payloads
use serde_json::json; // For JSON responses
use tracing::{info, instrument};

use crate::errors::AppError;
use crate::services::Registration;
use crate::state::AppState;

// --- Request DTOs ---
#[derive(Deserialize, Debug)]
pub struct RegisterRequestPayload {
  #[serde(default)]
  pub name: String,
  #[serde(default)]
  pub email: String,
  #[serde(default)]
  pub password: String,
  pub phone: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct LoginRequestPayload {
  #[serde(default)]
  pub email: String,
  #[serde(default)]
  pub password: String,
}

// --- Handler Implementations ---

#[instrument(
    name = "handler::register",
    skip(app_state, req_payload),
    fields(req_email = %req_payload.email)
)]
pub async fn register_handler(
  app_state: web::Data<AppState>,
  req_payload: web::Json<RegisterRequestPayload>,
) -> Result<HttpResponse, AppError> {
  let RegisterRequestPayload {
    name,
    email,
    password,
    phone,
  } = req_payload.into_inner();

  let user = app_state
    .credentials
    .register(Registration {
      name,
      email,
      password,
      phone,
    })
    .await?;
  let token = app_state.sessions.issue(user.id, &user.email)?;

  info!(user_id = %user.id, "Registration successful.");
  Ok(HttpResponse::Created().json(json!({
      "message": "User registered successfully",
      "token": token,
      "userId": user.id,
  })))
}

#[instrument(
    name = "handler::login",
    skip(app_state, req_payload),
    fields(req_email = %req_payload.email)
)]
pub async fn login_handler(
  app_state: web::Data<AppState>,
  req_payload: web::Json<LoginRequestPayload>,
) -> Result<HttpResponse, AppError> {
  let user = app_state
    .credentials
    .verify(&req_payload.email, &req_payload.password)
    .await?;
  let token = app_state.sessions.issue(user.id, &user.email)?;

  info!(user_id = %user.id, "Login successful.");
  Ok(HttpResponse::Ok().json(json!({
      "message": "Login successful",
      "token": token,
      "userId": user.id,
      "name": user.name,
  })))
}
