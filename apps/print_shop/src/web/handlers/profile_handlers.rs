// print_shop/src/web/handlers/profile_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};

use crate::errors::AppError;
use crate::models::ProfileView;
use crate::state::AppState;
use crate::web::extractors::AuthenticatedUser;

#[derive(Deserialize, Debug)]
pub struct UpdateProfilePayload {
  #[serde(default)]
  pub name: String,
  pub phone: Option<String>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordPayload {
  #[serde(default)]
  pub current_password: String,
  #[serde(default)]
  pub new_password: String,
}

#[instrument(name = "handler::get_profile", skip(app_state, auth_user), fields(user_id = %auth_user.user_id))]
pub async fn get_profile_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
  let user = app_state.credentials.profile(auth_user.user_id).await?;
  Ok(HttpResponse::Ok().json(ProfileView::from(user)))
}

#[instrument(name = "handler::update_profile", skip(app_state, auth_user, req_payload), fields(user_id = %auth_user.user_id))]
pub async fn update_profile_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
  req_payload: web::Json<UpdateProfilePayload>,
) -> Result<HttpResponse, AppError> {
  let UpdateProfilePayload { name, phone } = req_payload.into_inner();
  app_state
    .credentials
    .update_profile(auth_user.user_id, &name, phone)
    .await?;

  info!("Profile updated.");
  Ok(HttpResponse::Ok().json(json!({ "message": "Profile updated successfully" })))
}

#[instrument(name = "handler::change_password", skip_all, fields(user_id = %auth_user.user_id))]
pub async fn change_password_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
  req_payload: web::Json<ChangePasswordPayload>,
) -> Result<HttpResponse, AppError> {
  app_state
    .credentials
    .change_password(auth_user.user_id, &req_payload.current_password, &req_payload.new_password)
    .await?;

  Ok(HttpResponse::Ok().json(json!({ "message": "Password updated successfully" })))
}
