// print_shop/src/web/handlers/dashboard_handlers.rs

use actix_web::{web, HttpResponse};
use tracing::{info, instrument};

use crate::errors::AppError;
use crate::state::AppState;
use crate::web::extractors::AuthenticatedUser;

#[instrument(name = "handler::dashboard", skip(app_state, auth_user), fields(user_id = %auth_user.user_id))]
pub async fn dashboard_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
  let dashboard = app_state.orders.dashboard(auth_user.user_id).await?;
  info!(
    total_orders = dashboard.summary.total_orders,
    recent = dashboard.recent_orders.len(),
    "Dashboard assembled."
  );
  Ok(HttpResponse::Ok().json(dashboard))
}
