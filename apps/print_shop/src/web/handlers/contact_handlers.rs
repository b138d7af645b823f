// print_shop/src/web/handlers/contact_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use crate::errors::AppError;
use crate::state::AppState;

#[derive(Deserialize, Debug)]
pub struct ContactPayload {
  #[serde(default)]
  pub name: String,
  #[serde(default)]
  pub email: String,
  pub subject: Option<String>,
  #[serde(default)]
  pub message: String,
}

#[instrument(name = "handler::contact", skip_all)]
pub async fn contact_handler(
  app_state: web::Data<AppState>,
  req_payload: web::Json<ContactPayload>,
) -> Result<HttpResponse, AppError> {
  let ContactPayload {
    name,
    email,
    subject,
    message,
  } = req_payload.into_inner();
  let stored = app_state.contact.submit(&name, &email, subject, &message).await?;

  Ok(HttpResponse::Created().json(json!({
      "message": "Message sent successfully",
      "messageId": stored.id,
  })))
}
