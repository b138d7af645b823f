// print_shop/src/db/postgres.rs

use async_trait::async_trait;
use printshop_core::{NewOrder, Order, OrderId, OrderStatus, OrderSummary, UserId};
use sqlx::PgPool;
use tracing::{error, instrument, warn};

use super::{MessageRepository, OrderRepository, UserRepository};
use crate::errors::{AppError, Result};
use crate::models::order::ORDER_COLUMNS;
use crate::models::{Message, NewMessage, NewUser, OrderRow, User};

const USER_COLUMNS: &str = "id, name, email, password_hash, phone, created_at";

#[derive(Clone)]
pub struct PgStore {
  pool: PgPool,
}

impl PgStore {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

fn into_orders(rows: Vec<OrderRow>) -> Result<Vec<Order>> {
  rows.into_iter().map(Order::try_from).collect()
}

#[async_trait]
impl UserRepository for PgStore {
  #[instrument(name = "pg::insert_user", skip_all)]
  async fn insert_user(&self, new_user: NewUser) -> Result<User> {
    sqlx::query_as::<_, User>(&format!(
      "INSERT INTO users (name, email, password_hash, phone) VALUES ($1, $2, $3, $4) RETURNING {}",
      USER_COLUMNS
    ))
    .bind(&new_user.name)
    .bind(&new_user.email)
    .bind(&new_user.password_hash)
    .bind(&new_user.phone)
    .fetch_one(&self.pool)
    .await
    .map_err(|e| match e {
      // The UNIQUE constraint on users.email is the duplicate check.
      sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
        warn!("Registration rejected: email already in use.");
        AppError::Conflict("Email already in use".to_string())
      }
      other => {
        error!(error = %other, "Database error while creating user.");
        AppError::Sqlx(other)
      }
    })
  }

  async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>(&format!("SELECT {} FROM users WHERE email = $1", USER_COLUMNS))
      .bind(email)
      .fetch_optional(&self.pool)
      .await?;
    Ok(user)
  }

  async fn find_user_by_id(&self, user_id: UserId) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>(&format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS))
      .bind(user_id)
      .fetch_optional(&self.pool)
      .await?;
    Ok(user)
  }

  #[instrument(name = "pg::update_password_hash", skip(self, password_hash), fields(user_id = %user_id))]
  async fn update_password_hash(&self, user_id: UserId, password_hash: &str) -> Result<bool> {
    let result = sqlx::query("UPDATE users SET password_hash = $1 WHERE id = $2")
      .bind(password_hash)
      .bind(user_id)
      .execute(&self.pool)
      .await?;
    Ok(result.rows_affected() > 0)
  }

  async fn update_profile(&self, user_id: UserId, name: &str, phone: Option<&str>) -> Result<bool> {
    let result = sqlx::query("UPDATE users SET name = $1, phone = $2 WHERE id = $3")
      .bind(name)
      .bind(phone)
      .bind(user_id)
      .execute(&self.pool)
      .await?;
    Ok(result.rows_affected() > 0)
  }
}

#[async_trait]
impl OrderRepository for PgStore {
  #[instrument(name = "pg::insert_order", skip_all, fields(user_id = %new_order.user_id))]
  async fn insert_order(&self, new_order: NewOrder) -> Result<Order> {
    let total_price = new_order.total_price();
    let row = sqlx::query_as::<_, OrderRow>(&format!(
      "INSERT INTO orders (user_id, service_type, material, description, needs_design, file_path, total_price) \
       VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING {}",
      ORDER_COLUMNS
    ))
    .bind(new_order.user_id)
    .bind(&new_order.service_type)
    .bind(new_order.material.as_str())
    .bind(&new_order.description)
    .bind(new_order.needs_design)
    .bind(&new_order.file_path)
    .bind(total_price)
    .fetch_one(&self.pool)
    .await?;
    Order::try_from(row)
  }

  async fn list_orders_for_user(&self, user_id: UserId, limit: Option<i64>) -> Result<Vec<Order>> {
    // LIMIT NULL means no limit in PostgreSQL.
    let rows = sqlx::query_as::<_, OrderRow>(&format!(
      "SELECT {} FROM orders WHERE user_id = $1 ORDER BY created_at DESC LIMIT $2",
      ORDER_COLUMNS
    ))
    .bind(user_id)
    .bind(limit)
    .fetch_all(&self.pool)
    .await?;
    into_orders(rows)
  }

  async fn find_order_for_user(&self, user_id: UserId, order_id: OrderId) -> Result<Option<Order>> {
    let row = sqlx::query_as::<_, OrderRow>(&format!(
      "SELECT {} FROM orders WHERE id = $1 AND user_id = $2",
      ORDER_COLUMNS
    ))
    .bind(order_id)
    .bind(user_id)
    .fetch_optional(&self.pool)
    .await?;
    row.map(Order::try_from).transpose()
  }

  async fn find_order(&self, order_id: OrderId) -> Result<Option<Order>> {
    let row = sqlx::query_as::<_, OrderRow>(&format!("SELECT {} FROM orders WHERE id = $1", ORDER_COLUMNS))
      .bind(order_id)
      .fetch_optional(&self.pool)
      .await?;
    row.map(Order::try_from).transpose()
  }

  async fn update_description_if_pending(&self, user_id: UserId, order_id: OrderId, description: &str) -> Result<bool> {
    let result =
      sqlx::query("UPDATE orders SET description = $1 WHERE id = $2 AND user_id = $3 AND status = 'pending'")
        .bind(description)
        .bind(order_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;
    Ok(result.rows_affected() > 0)
  }

  async fn cancel_if_pending(&self, user_id: UserId, order_id: OrderId) -> Result<bool> {
    let result =
      sqlx::query("UPDATE orders SET status = 'cancelled' WHERE id = $1 AND user_id = $2 AND status = 'pending'")
        .bind(order_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;
    Ok(result.rows_affected() > 0)
  }

  async fn transition_status(&self, order_id: OrderId, from: OrderStatus, to: OrderStatus) -> Result<Option<Order>> {
    let row = sqlx::query_as::<_, OrderRow>(&format!(
      "UPDATE orders SET status = $1 WHERE id = $2 AND status = $3 RETURNING {}",
      ORDER_COLUMNS
    ))
    .bind(to.as_str())
    .bind(order_id)
    .bind(from.as_str())
    .fetch_optional(&self.pool)
    .await?;
    row.map(Order::try_from).transpose()
  }

  async fn summary_for_user(&self, user_id: UserId) -> Result<OrderSummary> {
    let (total_orders, active_orders, completed_orders, total_spent) =
      sqlx::query_as::<_, (i64, i64, i64, i64)>(
        "SELECT \
           COUNT(*) AS total_orders, \
           COUNT(*) FILTER (WHERE status IN ('pending', 'processing')) AS active_orders, \
           COUNT(*) FILTER (WHERE status = 'completed') AS completed_orders, \
           COALESCE(SUM(total_price), 0)::BIGINT AS total_spent \
         FROM orders WHERE user_id = $1",
      )
      .bind(user_id)
      .fetch_one(&self.pool)
      .await?;
    Ok(OrderSummary {
      total_orders,
      active_orders,
      completed_orders,
      total_spent,
    })
  }
}

#[async_trait]
impl MessageRepository for PgStore {
  async fn insert_message(&self, new_message: NewMessage) -> Result<Message> {
    let message = sqlx::query_as::<_, Message>(
      "INSERT INTO messages (name, email, subject, message) VALUES ($1, $2, $3, $4) \
       RETURNING id, name, email, subject, message, created_at",
    )
    .bind(&new_message.name)
    .bind(&new_message.email)
    .bind(&new_message.subject)
    .bind(&new_message.message)
    .fetch_one(&self.pool)
    .await?;
    Ok(message)
  }
}
