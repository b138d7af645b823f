// print_shop/src/web/routes.rs

use actix_web::{error, web, HttpResponse};

use crate::errors::AppError;
use crate::web::handlers::{
  auth_handlers, contact_handlers, dashboard_handlers, order_handlers, pricing_handlers, profile_handlers,
  shop_handlers,
};

async fn health_check_handler() -> HttpResponse {
  HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

/// Malformed JSON bodies and query strings answer with the same
/// `{"message": ...}` envelope as every other 400.
fn json_config() -> web::JsonConfig {
  web::JsonConfig::default()
    .error_handler(|err, _req| error::Error::from(AppError::Validation(format!("Invalid JSON body: {}", err))))
}

fn query_config() -> web::QueryConfig {
  web::QueryConfig::default()
    .error_handler(|err, _req| error::Error::from(AppError::Validation(format!("Invalid query string: {}", err))))
}

/// Every path parameter is an order id, so an unparsable one is just a missing order.
fn path_config() -> web::PathConfig {
  web::PathConfig::default()
    .error_handler(|_err, _req| error::Error::from(AppError::NotFound("Order not found".to_string())))
}

pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg.app_data(json_config()).app_data(query_config()).app_data(path_config()).service(
    web::scope("/api")
      .route("/health", web::get().to(health_check_handler))
      // Accounts
      .route("/register", web::post().to(auth_handlers::register_handler))
      .route("/login", web::post().to(auth_handlers::login_handler))
      .service(
        web::resource("/profile")
          .route(web::get().to(profile_handlers::get_profile_handler))
          .route(web::put().to(profile_handlers::update_profile_handler)),
      )
      .route("/change-password", web::put().to(profile_handlers::change_password_handler))
      // Orders
      .service(
        web::resource("/orders")
          .route(web::get().to(order_handlers::list_orders_handler))
          .route(web::post().to(order_handlers::create_order_handler)),
      )
      .service(
        web::resource("/orders/{order_id}")
          .route(web::get().to(order_handlers::get_order_handler))
          .route(web::put().to(order_handlers::update_order_handler))
          .route(web::delete().to(order_handlers::cancel_order_handler)),
      )
      .route("/dashboard", web::get().to(dashboard_handlers::dashboard_handler))
      // Public
      .route("/contact", web::post().to(contact_handlers::contact_handler))
      .route("/quote", web::get().to(pricing_handlers::quote_handler))
      .route("/materials", web::get().to(pricing_handlers::materials_handler))
      // Shop back office
      .route(
        "/shop/orders/{order_id}/status",
        web::put().to(shop_handlers::set_order_status_handler),
      ),
  );
}
