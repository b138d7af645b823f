// print_shop/src/web/handlers/shop_handlers.rs

use actix_web::{web, HttpResponse};
use printshop_core::{OrderId, OrderStatus};
use serde::Deserialize;
use tracing::{info, instrument};

use crate::errors::AppError;
use crate::state::AppState;
use crate::web::extractors::ShopAccess;

#[derive(Deserialize, Debug)]
pub struct StatusPayload {
  #[serde(default)]
  pub status: String,
}

#[instrument(name = "handler::shop_set_status", skip(app_state, _shop, req_payload), fields(status = %req_payload.status))]
pub async fn set_order_status_handler(
  app_state: web::Data<AppState>,
  _shop: ShopAccess,
  path: web::Path<OrderId>,
  req_payload: web::Json<StatusPayload>,
) -> Result<HttpResponse, AppError> {
  let target: OrderStatus = req_payload
    .status
    .parse()
    .map_err(|e| AppError::Validation(format!("{}", e)))?;
  let order = app_state.orders.advance(path.into_inner(), target).await?;
  info!(order_id = %order.id, status = %order.status, "Order status changed by shop.");
  Ok(HttpResponse::Ok().json(order))
}
