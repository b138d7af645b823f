// print_shop/src/models/order.rs

use chrono::{DateTime, Utc};
use printshop_core::{Order, OrderStatus};
use sqlx::FromRow;
use uuid::Uuid;

use crate::errors::AppError;

/// Column list shared by every query that materialises an `OrderRow`.
pub const ORDER_COLUMNS: &str =
  "id, user_id, service_type, material, description, needs_design, status, file_path, total_price, created_at";

/// `orders` row. Status is stored as text guarded by a CHECK constraint.
#[derive(Debug, Clone, FromRow)]
pub struct OrderRow {
  pub id: Uuid,
  pub user_id: Uuid,
  pub service_type: String,
  pub material: String,
  pub description: String,
  pub needs_design: bool,
  pub status: String,
  pub file_path: Option<String>,
  pub total_price: i32,
  pub created_at: DateTime<Utc>,
}

impl TryFrom<OrderRow> for Order {
  type Error = AppError;

  fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
    let status = row
      .status
      .parse::<OrderStatus>()
      .map_err(|e| AppError::Internal(format!("Corrupt order row {}: {}", row.id, e)))?;
    Ok(Order {
      id: row.id,
      user_id: row.user_id,
      service_type: row.service_type,
      material: row.material,
      description: row.description,
      needs_design: row.needs_design,
      status,
      file_path: row.file_path,
      total_price: row.total_price,
      created_at: row.created_at,
    })
  }
}
