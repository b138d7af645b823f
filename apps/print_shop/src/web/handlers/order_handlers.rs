// print_shop/src/web/handlers/order_handlers.rs

use actix_multipart::{Field, Multipart};
use actix_web::{web, HttpResponse};
use futures_util::TryStreamExt;
use printshop_core::OrderId;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info, instrument, warn};

use crate::errors::AppError;
use crate::services::OrderSubmission;
use crate::state::AppState;
use crate::web::extractors::AuthenticatedUser;
use crate::web::handlers::parse_flag;

/// Upper bound for any non-file form field.
const MAX_TEXT_FIELD_BYTES: usize = 64 * 1024;

#[derive(Deserialize, Debug)]
pub struct UpdateOrderPayload {
  #[serde(default)]
  pub description: String,
}

#[derive(Debug)]
struct UploadedFile {
  name: String,
  contents: Vec<u8>,
}

async fn read_field(field: &mut Field, limit: usize, what: &str) -> Result<Vec<u8>, AppError> {
  let mut buf = Vec::new();
  while let Some(chunk) = field.try_next().await? {
    if buf.len() + chunk.len() > limit {
      return Err(AppError::Validation(format!("{} exceeds the {} byte limit.", what, limit)));
    }
    buf.extend_from_slice(&chunk);
  }
  Ok(buf)
}

async fn read_text(field: &mut Field, name: &str) -> Result<String, AppError> {
  let raw = read_field(field, MAX_TEXT_FIELD_BYTES, name).await?;
  String::from_utf8(raw).map_err(|_| AppError::Validation(format!("{} must be valid UTF-8.", name)))
}

/// Drains the form into a submission plus the optional design file.
/// Unknown fields are read and discarded.
async fn read_order_form(
  mut payload: Multipart,
  max_upload_bytes: usize,
) -> Result<(OrderSubmission, Option<UploadedFile>), AppError> {
  let mut submission = OrderSubmission::default();
  let mut upload = None;

  while let Some(mut field) = payload.try_next().await? {
    let name = field.name().unwrap_or_default().to_string();
    match name.as_str() {
      "service_type" => submission.service_type = read_text(&mut field, &name).await?,
      "material" => submission.material = read_text(&mut field, &name).await?,
      "description" => submission.description = read_text(&mut field, &name).await?,
      "needs_design" => submission.needs_design = parse_flag(&read_text(&mut field, &name).await?),
      "file" => {
        let file_name = field
          .content_disposition()
          .and_then(|cd| cd.get_filename())
          .unwrap_or_default()
          .to_string();
        let contents = read_field(&mut field, max_upload_bytes, "Uploaded file").await?;
        // Browsers send an empty part when no file was picked.
        if !(file_name.is_empty() && contents.is_empty()) {
          upload = Some(UploadedFile {
            name: file_name,
            contents,
          });
        }
      }
      other => {
        debug!(field = other, "Ignoring unexpected form field.");
        read_field(&mut field, MAX_TEXT_FIELD_BYTES, "Form field").await?;
      }
    }
  }

  Ok((submission, upload))
}

#[instrument(name = "handler::create_order", skip(app_state, auth_user, payload), fields(user_id = %auth_user.user_id))]
pub async fn create_order_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
  payload: Multipart,
) -> Result<HttpResponse, AppError> {
  let (mut submission, upload) = read_order_form(payload, app_state.config.max_upload_bytes).await?;
  // Nothing touches the disk for a submission that would be rejected anyway.
  submission.validate()?;

  if let Some(file) = upload {
    let size = file.contents.len();
    let path = app_state.files.save(&file.name, file.contents).await?;
    info!(%path, size, "Design file stored.");
    submission.file_path = Some(path);
  }

  let stored_file = submission.file_path.clone();
  let order = match app_state.orders.create(auth_user.user_id, submission).await {
    Ok(order) => order,
    Err(err) => {
      if let Some(handle) = stored_file {
        if let Err(cleanup_err) = app_state.files.remove(&handle).await {
          warn!(%handle, error = %cleanup_err, "Orphaned design file left on disk.");
        }
      }
      return Err(err);
    }
  };
  Ok(HttpResponse::Created().json(json!({
      "message": "Order created successfully",
      "orderId": order.id,
      "totalPrice": order.total_price,
  })))
}

#[instrument(name = "handler::list_orders", skip(app_state, auth_user), fields(user_id = %auth_user.user_id))]
pub async fn list_orders_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
  let orders = app_state.orders.list(auth_user.user_id).await?;
  Ok(HttpResponse::Ok().json(orders))
}

#[instrument(name = "handler::get_order", skip(app_state, auth_user), fields(user_id = %auth_user.user_id))]
pub async fn get_order_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
  path: web::Path<OrderId>,
) -> Result<HttpResponse, AppError> {
  let order = app_state.orders.get(auth_user.user_id, path.into_inner()).await?;
  Ok(HttpResponse::Ok().json(order))
}

#[instrument(name = "handler::update_order", skip(app_state, auth_user, req_payload), fields(user_id = %auth_user.user_id))]
pub async fn update_order_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
  path: web::Path<OrderId>,
  req_payload: web::Json<UpdateOrderPayload>,
) -> Result<HttpResponse, AppError> {
  app_state
    .orders
    .update_description(auth_user.user_id, path.into_inner(), &req_payload.description)
    .await?;
  Ok(HttpResponse::Ok().json(json!({ "message": "Order updated successfully" })))
}

#[instrument(name = "handler::cancel_order", skip(app_state, auth_user), fields(user_id = %auth_user.user_id))]
pub async fn cancel_order_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
  path: web::Path<OrderId>,
) -> Result<HttpResponse, AppError> {
  app_state.orders.cancel(auth_user.user_id, path.into_inner()).await?;
  Ok(HttpResponse::Ok().json(json!({ "message": "Order cancelled successfully" })))
}
