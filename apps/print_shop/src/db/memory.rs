// print_shop/src/db/memory.rs

//! Process-local store with the same semantics as the PostgreSQL adapter:
//! unique emails, ownership-filtered lookups and conditional updates.
//! The lock is never held across an `.await`.

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use printshop_core::{NewOrder, Order, OrderId, OrderStatus, OrderSummary, UserId};
use uuid::Uuid;

use super::{MessageRepository, OrderRepository, UserRepository};
use crate::errors::{AppError, Result};
use crate::models::{Message, NewMessage, NewUser, User};

#[derive(Default)]
struct Tables {
  users: Vec<User>,
  /// Insertion sequence breaks ties between equal `created_at` values.
  orders: Vec<(u64, Order)>,
  messages: Vec<Message>,
  next_seq: u64,
}

#[derive(Default)]
pub struct InMemoryStore {
  tables: Mutex<Tables>,
}

impl InMemoryStore {
  pub fn new() -> Self {
    Self::default()
  }

  /// Snapshot of a stored message list, newest last.
  pub fn messages(&self) -> Vec<Message> {
    self.tables.lock().messages.clone()
  }

  fn newest_first(orders: &mut [(u64, Order)]) {
    orders.sort_by(|(seq_a, a), (seq_b, b)| b.created_at.cmp(&a.created_at).then(seq_b.cmp(seq_a)));
  }
}

#[async_trait]
impl UserRepository for InMemoryStore {
  async fn insert_user(&self, new_user: NewUser) -> Result<User> {
    let mut tables = self.tables.lock();
    if tables.users.iter().any(|u| u.email == new_user.email) {
      return Err(AppError::Conflict("Email already in use".to_string()));
    }
    let user = User {
      id: Uuid::new_v4(),
      name: new_user.name,
      email: new_user.email,
      password_hash: new_user.password_hash,
      phone: new_user.phone,
      created_at: Utc::now(),
    };
    tables.users.push(user.clone());
    Ok(user)
  }

  async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
    Ok(self.tables.lock().users.iter().find(|u| u.email == email).cloned())
  }

  async fn find_user_by_id(&self, user_id: UserId) -> Result<Option<User>> {
    Ok(self.tables.lock().users.iter().find(|u| u.id == user_id).cloned())
  }

  async fn update_password_hash(&self, user_id: UserId, password_hash: &str) -> Result<bool> {
    let mut tables = self.tables.lock();
    match tables.users.iter_mut().find(|u| u.id == user_id) {
      Some(user) => {
        user.password_hash = password_hash.to_string();
        Ok(true)
      }
      None => Ok(false),
    }
  }

  async fn update_profile(&self, user_id: UserId, name: &str, phone: Option<&str>) -> Result<bool> {
    let mut tables = self.tables.lock();
    match tables.users.iter_mut().find(|u| u.id == user_id) {
      Some(user) => {
        user.name = name.to_string();
        user.phone = phone.map(str::to_string);
        Ok(true)
      }
      None => Ok(false),
    }
  }
}

#[async_trait]
impl OrderRepository for InMemoryStore {
  async fn insert_order(&self, new_order: NewOrder) -> Result<Order> {
    let mut tables = self.tables.lock();
    if !tables.users.iter().any(|u| u.id == new_order.user_id) {
      return Err(AppError::Internal(format!(
        "Order references unknown user {}",
        new_order.user_id
      )));
    }
    let order = new_order.into_order(Uuid::new_v4(), Utc::now());
    let seq = tables.next_seq;
    tables.next_seq += 1;
    tables.orders.push((seq, order.clone()));
    Ok(order)
  }

  async fn list_orders_for_user(&self, user_id: UserId, limit: Option<i64>) -> Result<Vec<Order>> {
    let mut owned: Vec<(u64, Order)> = self
      .tables
      .lock()
      .orders
      .iter()
      .filter(|(_, o)| o.user_id == user_id)
      .cloned()
      .collect();
    Self::newest_first(&mut owned);
    let take = limit.map_or(usize::MAX, |l| usize::try_from(l.max(0)).unwrap_or(usize::MAX));
    Ok(owned.into_iter().take(take).map(|(_, o)| o).collect())
  }

  async fn find_order_for_user(&self, user_id: UserId, order_id: OrderId) -> Result<Option<Order>> {
    Ok(
      self
        .tables
        .lock()
        .orders
        .iter()
        .find(|(_, o)| o.id == order_id && o.user_id == user_id)
        .map(|(_, o)| o.clone()),
    )
  }

  async fn find_order(&self, order_id: OrderId) -> Result<Option<Order>> {
    Ok(
      self
        .tables
        .lock()
        .orders
        .iter()
        .find(|(_, o)| o.id == order_id)
        .map(|(_, o)| o.clone()),
    )
  }

  async fn update_description_if_pending(&self, user_id: UserId, order_id: OrderId, description: &str) -> Result<bool> {
    let mut tables = self.tables.lock();
    let target = tables
      .orders
      .iter_mut()
      .find(|(_, o)| o.id == order_id && o.user_id == user_id && o.status == OrderStatus::Pending);
    match target {
      Some((_, order)) => {
        order.description = description.to_string();
        Ok(true)
      }
      None => Ok(false),
    }
  }

  async fn cancel_if_pending(&self, user_id: UserId, order_id: OrderId) -> Result<bool> {
    let mut tables = self.tables.lock();
    let target = tables
      .orders
      .iter_mut()
      .find(|(_, o)| o.id == order_id && o.user_id == user_id && o.status == OrderStatus::Pending);
    match target {
      Some((_, order)) => {
        order.status = OrderStatus::Cancelled;
        Ok(true)
      }
      None => Ok(false),
    }
  }

  async fn transition_status(&self, order_id: OrderId, from: OrderStatus, to: OrderStatus) -> Result<Option<Order>> {
    let mut tables = self.tables.lock();
    let target = tables
      .orders
      .iter_mut()
      .find(|(_, o)| o.id == order_id && o.status == from);
    Ok(target.map(|(_, order)| {
      order.status = to;
      order.clone()
    }))
  }

  async fn summary_for_user(&self, user_id: UserId) -> Result<OrderSummary> {
    let tables = self.tables.lock();
    Ok(OrderSummary::from_orders(
      tables.orders.iter().map(|(_, o)| o).filter(|o| o.user_id == user_id),
    ))
  }
}

#[async_trait]
impl MessageRepository for InMemoryStore {
  async fn insert_message(&self, new_message: NewMessage) -> Result<Message> {
    let message = Message {
      id: Uuid::new_v4(),
      name: new_message.name,
      email: new_message.email,
      subject: new_message.subject,
      message: new_message.message,
      created_at: Utc::now(),
    };
    self.tables.lock().messages.push(message.clone());
    Ok(message)
  }
}
