// printshop_core/src/order.rs

//! Order types and the order state machine.
//!
//! ```text
//!            +--> processing --+
//!            |                 v
//!  pending --+---------------> completed
//!            |
//!            +--> cancelled
//! ```
//!
//! `completed` and `cancelled` are terminal. Only `pending` orders accept a new
//! description or a cancellation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::TransitionError;
use crate::pricing::{quote, Material};

pub type UserId = Uuid;
pub type OrderId = Uuid;

/// How many orders the dashboard shows under "recent".
pub const RECENT_ORDERS_LIMIT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
  Pending,
  Processing,
  Completed,
  Cancelled,
}

impl OrderStatus {
  pub const ALL: [OrderStatus; 4] = [
    OrderStatus::Pending,
    OrderStatus::Processing,
    OrderStatus::Completed,
    OrderStatus::Cancelled,
  ];

  pub fn as_str(self) -> &'static str {
    match self {
      OrderStatus::Pending => "pending",
      OrderStatus::Processing => "processing",
      OrderStatus::Completed => "completed",
      OrderStatus::Cancelled => "cancelled",
    }
  }

  pub fn is_terminal(self) -> bool {
    matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
  }

  /// Counted as "active" on the dashboard.
  pub fn is_active(self) -> bool {
    matches!(self, OrderStatus::Pending | OrderStatus::Processing)
  }

  /// Description edits and cancellation are only allowed here.
  pub fn is_editable(self) -> bool {
    self == OrderStatus::Pending
  }

  pub fn can_transition_to(self, next: OrderStatus) -> bool {
    use OrderStatus::*;
    matches!(
      (self, next),
      (Pending, Processing) | (Pending, Completed) | (Pending, Cancelled) | (Processing, Completed)
    )
  }

  pub fn transition_to(self, next: OrderStatus) -> Result<OrderStatus, TransitionError> {
    if self.can_transition_to(next) {
      Ok(next)
    } else {
      tracing::debug!(from = %self, to = %next, "Rejected order status transition.");
      Err(TransitionError { from: self, to: next })
    }
  }
}

impl fmt::Display for OrderStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStatus(pub String);

impl fmt::Display for UnknownStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "unknown order status '{}'", self.0)
  }
}

impl std::error::Error for UnknownStatus {}

impl FromStr for OrderStatus {
  type Err = UnknownStatus;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    OrderStatus::ALL
      .into_iter()
      .find(|status| status.as_str() == s)
      .ok_or_else(|| UnknownStatus(s.to_string()))
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
  pub id: OrderId,
  pub user_id: UserId,
  pub service_type: String,
  pub material: String,
  pub description: String,
  pub needs_design: bool,
  pub status: OrderStatus,
  /// Handle returned by the file store, if a model file was uploaded.
  pub file_path: Option<String>,
  pub total_price: i32,
  pub created_at: DateTime<Utc>,
}

/// Everything needed to place an order. The price is derived, never supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
  pub user_id: UserId,
  pub service_type: String,
  pub material: Material,
  pub description: String,
  pub needs_design: bool,
  pub file_path: Option<String>,
}

impl NewOrder {
  pub fn total_price(&self) -> i32 {
    quote(&self.material, self.needs_design)
  }

  /// Materialise the order as it is first stored: priced and `pending`.
  pub fn into_order(self, id: OrderId, created_at: DateTime<Utc>) -> Order {
    let total_price = self.total_price();
    Order {
      id,
      user_id: self.user_id,
      service_type: self.service_type,
      material: self.material.to_string(),
      description: self.description,
      needs_design: self.needs_design,
      status: OrderStatus::Pending,
      file_path: self.file_path,
      total_price,
      created_at,
    }
  }
}

/// Per-user totals shown on the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSummary {
  pub total_orders: i64,
  pub active_orders: i64,
  pub completed_orders: i64,
  /// Sum of `total_price` over every order of the user, cancelled ones included.
  pub total_spent: i64,
}

impl OrderSummary {
  pub fn from_orders<'a, I>(orders: I) -> Self
  where
    I: IntoIterator<Item = &'a Order>,
  {
    orders.into_iter().fold(OrderSummary::default(), |mut acc, order| {
      acc.total_orders += 1;
      if order.status.is_active() {
        acc.active_orders += 1;
      }
      if order.status == OrderStatus::Completed {
        acc.completed_orders += 1;
      }
      acc.total_spent += i64::from(order.total_price);
      acc
    })
  }
}
