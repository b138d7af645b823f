// print_shop/src/services/order_service.rs

//! Order lifecycle manager.
//!
//! Customer-side edits (`update_description`, `cancel`) collapse "no such
//! order", "someone else's order" and "no longer pending" into the same
//! `NotFound`, because all three come back from the store as zero rows
//! affected.

use printshop_core::{Material, NewOrder, Order, OrderId, OrderStatus, OrderSummary, UserId, RECENT_ORDERS_LIMIT};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::db::OrderRepository;
use crate::errors::{AppError, Result};

const ORDER_NOT_FOUND: &str = "Order not found";
const NOT_UPDATABLE: &str = "Order not found or cannot be updated anymore";
const NOT_CANCELLABLE: &str = "Order not found or cannot be cancelled anymore";

/// Customer input for a new order, before pricing.
#[derive(Debug, Clone, Default)]
pub struct OrderSubmission {
  pub service_type: String,
  pub material: String,
  pub description: String,
  pub needs_design: bool,
  pub file_path: Option<String>,
}

impl OrderSubmission {
  pub fn validate(&self) -> Result<()> {
    if self.service_type.trim().is_empty() {
      return Err(AppError::Validation("service_type is required.".to_string()));
    }
    if self.material.trim().is_empty() {
      return Err(AppError::Validation("material is required.".to_string()));
    }
    Ok(())
  }
}

#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
  pub summary: OrderSummary,
  #[serde(rename = "recentOrders")]
  pub recent_orders: Vec<Order>,
}

#[derive(Clone)]
pub struct OrderService {
  orders: Arc<dyn OrderRepository>,
}

impl OrderService {
  pub fn new(orders: Arc<dyn OrderRepository>) -> Self {
    Self { orders }
  }

  /// Prices the order now; that price is final.
  #[instrument(name = "orders::create", skip(self, submission), fields(material = %submission.material))]
  pub async fn create(&self, user_id: UserId, submission: OrderSubmission) -> Result<Order> {
    submission.validate()?;
    let new_order = NewOrder {
      user_id,
      service_type: submission.service_type.trim().to_string(),
      material: Material::parse(&submission.material),
      description: submission.description,
      needs_design: submission.needs_design,
      file_path: submission.file_path,
    };
    let order = self.orders.insert_order(new_order).await?;
    info!(order_id = %order.id, total_price = order.total_price, "Order created.");
    Ok(order)
  }

  pub async fn list(&self, user_id: UserId) -> Result<Vec<Order>> {
    self.orders.list_orders_for_user(user_id, None).await
  }

  pub async fn get(&self, user_id: UserId, order_id: OrderId) -> Result<Order> {
    self
      .orders
      .find_order_for_user(user_id, order_id)
      .await?
      .ok_or_else(|| AppError::NotFound(ORDER_NOT_FOUND.to_string()))
  }

  #[instrument(name = "orders::update_description", skip(self, description))]
  pub async fn update_description(&self, user_id: UserId, order_id: OrderId, description: &str) -> Result<()> {
    if self.orders.update_description_if_pending(user_id, order_id, description).await? {
      info!("Order description updated.");
      Ok(())
    } else {
      warn!("Order description update matched no pending order.");
      Err(AppError::NotFound(NOT_UPDATABLE.to_string()))
    }
  }

  #[instrument(name = "orders::cancel", skip(self))]
  pub async fn cancel(&self, user_id: UserId, order_id: OrderId) -> Result<()> {
    if self.orders.cancel_if_pending(user_id, order_id).await? {
      info!("Order cancelled.");
      Ok(())
    } else {
      warn!("Order cancellation matched no pending order.");
      Err(AppError::NotFound(NOT_CANCELLABLE.to_string()))
    }
  }

  /// Summary first, then the most recent orders.
  pub async fn dashboard(&self, user_id: UserId) -> Result<Dashboard> {
    let summary = self.orders.summary_for_user(user_id).await?;
    let recent_orders = self
      .orders
      .list_orders_for_user(user_id, Some(RECENT_ORDERS_LIMIT as i64))
      .await?;
    Ok(Dashboard { summary, recent_orders })
  }

  /// Shop-side status change, forward only (`processing` or `completed`).
  /// Cancelling belongs to the customer. The transition is checked against the
  /// state machine, then applied only if the order is still in the status that was read.
  #[instrument(name = "orders::advance", skip(self))]
  pub async fn advance(&self, order_id: OrderId, to: OrderStatus) -> Result<Order> {
    if !matches!(to, OrderStatus::Processing | OrderStatus::Completed) {
      return Err(AppError::Validation(format!(
        "The shop can only move orders to 'processing' or 'completed', not '{}'.",
        to
      )));
    }
    let current = self
      .orders
      .find_order(order_id)
      .await?
      .ok_or_else(|| AppError::NotFound(ORDER_NOT_FOUND.to_string()))?;
    current.status.transition_to(to)?;

    match self.orders.transition_status(order_id, current.status, to).await? {
      Some(order) => {
        info!(from = %current.status, to = %order.status, "Order status advanced.");
        Ok(order)
      }
      None => Err(AppError::Conflict(format!(
        "Order is no longer '{}'; reload and retry",
        current.status
      ))),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::db::{InMemoryStore, UserRepository};
  use crate::models::NewUser;

  async fn service_with_user() -> (OrderService, UserId, UserId) {
    let store = Arc::new(InMemoryStore::new());
    let mut ids = Vec::new();
    for email in ["ada@example.com", "bob@example.com"] {
      let user = store
        .insert_user(NewUser {
          name: "x".to_string(),
          email: email.to_string(),
          password_hash: "h".to_string(),
          phone: None,
        })
        .await
        .unwrap();
      ids.push(user.id);
    }
    (OrderService::new(store), ids[0], ids[1])
  }

  fn submission(material: &str, needs_design: bool) -> OrderSubmission {
    OrderSubmission {
      service_type: "printing".to_string(),
      material: material.to_string(),
      description: "a part".to_string(),
      needs_design,
      file_path: None,
    }
  }

  #[actix_web::test]
  async fn create_prices_at_submission() {
    let (service, ada, _) = service_with_user().await;
    let order = service.create(ada, submission("resin", true)).await.unwrap();
    assert_eq!(order.total_price, 75);
    assert_eq!(order.status, OrderStatus::Pending);
  }

  #[actix_web::test]
  async fn blank_material_is_rejected() {
    let (service, ada, _) = service_with_user().await;
    let result = service.create(ada, submission("  ", false)).await;
    assert!(matches!(result, Err(AppError::Validation(_))));
  }

  #[actix_web::test]
  async fn non_pending_edits_look_like_missing_orders() {
    let (service, ada, bob) = service_with_user().await;
    let order = service.create(ada, submission("pla", false)).await.unwrap();
    service.advance(order.id, OrderStatus::Processing).await.unwrap();

    let on_processing = service.update_description(ada, order.id, "new").await.unwrap_err();
    let on_foreign = service.update_description(bob, order.id, "new").await.unwrap_err();
    let on_missing = service.update_description(ada, OrderId::new_v4(), "new").await.unwrap_err();
    for err in [&on_processing, &on_foreign, &on_missing] {
      assert!(matches!(err, AppError::NotFound(m) if m == NOT_UPDATABLE));
    }

    let cancel_processing = service.cancel(ada, order.id).await.unwrap_err();
    let cancel_missing = service.cancel(ada, OrderId::new_v4()).await.unwrap_err();
    assert_eq!(cancel_processing.to_string(), cancel_missing.to_string());
  }

  #[actix_web::test]
  async fn advance_follows_state_machine() {
    let (service, ada, _) = service_with_user().await;
    let order = service.create(ada, submission("pla", false)).await.unwrap();
    service.cancel(ada, order.id).await.unwrap();

    let result = service.advance(order.id, OrderStatus::Processing).await;
    assert!(matches!(result, Err(AppError::Validation(_))));
    assert_eq!(service.get(ada, order.id).await.unwrap().status, OrderStatus::Cancelled);
  }

  #[actix_web::test]
  async fn shop_cannot_cancel_or_reopen_orders() {
    let (service, ada, _) = service_with_user().await;
    let order = service.create(ada, submission("petg", false)).await.unwrap();

    for target in [OrderStatus::Cancelled, OrderStatus::Pending] {
      let result = service.advance(order.id, target).await;
      assert!(matches!(result, Err(AppError::Validation(_))), "{target}");
    }
    assert_eq!(service.get(ada, order.id).await.unwrap().status, OrderStatus::Pending);

    let completed = service.advance(order.id, OrderStatus::Completed).await.unwrap();
    assert_eq!(completed.status, OrderStatus::Completed);
  }

  #[actix_web::test]
  async fn dashboard_caps_recent_orders() {
    let (service, ada, bob) = service_with_user().await;
    for _ in 0..6 {
      service.create(ada, submission("abs", false)).await.unwrap();
    }
    service.create(bob, submission("metal", false)).await.unwrap();

    let dashboard = service.dashboard(ada).await.unwrap();
    assert_eq!(dashboard.summary.total_orders, 6);
    assert_eq!(dashboard.summary.active_orders, 6);
    assert_eq!(dashboard.summary.total_spent, 6 * 18);
    assert_eq!(dashboard.recent_orders.len(), RECENT_ORDERS_LIMIT);
    assert!(dashboard.recent_orders.iter().all(|o| o.user_id == ada));
  }
}
