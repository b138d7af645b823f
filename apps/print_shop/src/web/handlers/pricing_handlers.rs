// print_shop/src/web/handlers/pricing_handlers.rs

//! Public price estimates. The figure charged is always the one computed when
//! the order is created.

use actix_web::{web, HttpResponse};
use printshop_core::{base_price, Material, Quote};
use serde::Deserialize;
use serde_json::json;

use crate::errors::AppError;
use crate::web::handlers::parse_flag;

#[derive(Deserialize, Debug)]
pub struct QuoteQuery {
  pub material: Option<String>,
  pub needs_design: Option<String>,
}

pub async fn quote_handler(query: web::Query<QuoteQuery>) -> Result<HttpResponse, AppError> {
  let material = query.material.as_deref().unwrap_or_default();
  if material.trim().is_empty() {
    return Err(AppError::Validation("material is required.".to_string()));
  }
  let needs_design = query.needs_design.as_deref().is_some_and(parse_flag);
  Ok(HttpResponse::Ok().json(Quote::for_material(Material::parse(material), needs_design)))
}

pub async fn materials_handler() -> HttpResponse {
  let catalogue: Vec<_> = Material::KNOWN
    .iter()
    .map(|m| json!({ "material": m, "basePrice": base_price(m) }))
    .collect();
  HttpResponse::Ok().json(catalogue)
}
