// print_shop/src/models/message.rs

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// A contact-form submission. Not tied to any user account.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Message {
  pub id: Uuid,
  pub name: String,
  pub email: String,
  pub subject: Option<String>,
  pub message: String,
  pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewMessage {
  pub name: String,
  pub email: String,
  pub subject: Option<String>,
  pub message: String,
}
