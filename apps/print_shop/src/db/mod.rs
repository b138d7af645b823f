// print_shop/src/db/mod.rs

//! Storage seams. Services only talk to these traits; `postgres` is the
//! production adapter and `memory` backs tests and local experiments.
//!
//! Every mutation is a single conditional statement scoped to one row, so two
//! concurrent edits of the same order cannot interleave a read and a write.

use async_trait::async_trait;
use printshop_core::{NewOrder, Order, OrderId, OrderStatus, OrderSummary, UserId};
use std::sync::Arc;

use crate::errors::Result;
use crate::models::{Message, NewMessage, NewUser, User};

pub mod memory;
pub mod postgres;

pub use memory::InMemoryStore;
pub use postgres::PgStore;

#[async_trait]
pub trait UserRepository: Send + Sync {
  /// Fails with `AppError::Conflict` when the email is already registered.
  async fn insert_user(&self, new_user: NewUser) -> Result<User>;

  /// Exact, case-sensitive email match.
  async fn find_user_by_email(&self, email: &str) -> Result<Option<User>>;

  async fn find_user_by_id(&self, user_id: UserId) -> Result<Option<User>>;

  /// Returns whether a row was updated.
  async fn update_password_hash(&self, user_id: UserId, password_hash: &str) -> Result<bool>;

  async fn update_profile(&self, user_id: UserId, name: &str, phone: Option<&str>) -> Result<bool>;
}

#[async_trait]
pub trait OrderRepository: Send + Sync {
  async fn insert_order(&self, new_order: NewOrder) -> Result<Order>;

  /// Newest first. `limit = None` returns every order of the user.
  async fn list_orders_for_user(&self, user_id: UserId, limit: Option<i64>) -> Result<Vec<Order>>;

  /// Ownership is part of the lookup: another user's order is `None`.
  async fn find_order_for_user(&self, user_id: UserId, order_id: OrderId) -> Result<Option<Order>>;

  /// Shop-side lookup, no ownership filter.
  async fn find_order(&self, order_id: OrderId) -> Result<Option<Order>>;

  /// `UPDATE ... WHERE id AND user_id AND status = 'pending'`; false when nothing matched.
  async fn update_description_if_pending(&self, user_id: UserId, order_id: OrderId, description: &str) -> Result<bool>;

  /// Same predicate as `update_description_if_pending`, sets status to `cancelled`.
  async fn cancel_if_pending(&self, user_id: UserId, order_id: OrderId) -> Result<bool>;

  /// Compare-and-set on the status column. `None` when the order is gone or no longer in `from`.
  async fn transition_status(&self, order_id: OrderId, from: OrderStatus, to: OrderStatus) -> Result<Option<Order>>;

  async fn summary_for_user(&self, user_id: UserId) -> Result<OrderSummary>;
}

#[async_trait]
pub trait MessageRepository: Send + Sync {
  async fn insert_message(&self, new_message: NewMessage) -> Result<Message>;
}

/// The three repositories a running service needs.
#[derive(Clone)]
pub struct Repositories {
  pub users: Arc<dyn UserRepository>,
  pub orders: Arc<dyn OrderRepository>,
  pub messages: Arc<dyn MessageRepository>,
}

impl Repositories {
  pub fn postgres(pool: sqlx::PgPool) -> Self {
    let store = Arc::new(PgStore::new(pool));
    Self {
      users: store.clone(),
      orders: store.clone(),
      messages: store,
    }
  }

  pub fn in_memory() -> Self {
    let store = Arc::new(InMemoryStore::new());
    Self {
      users: store.clone(),
      orders: store.clone(),
      messages: store,
    }
  }
}
