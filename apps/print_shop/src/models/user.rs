// print_shop/src/models/user.rs

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
  pub id: Uuid,
  pub name: String,
  pub email: String,
  #[serde(skip_serializing)] // Never send password hash to client
  pub password_hash: String,
  pub phone: Option<String>,
  pub created_at: DateTime<Utc>,
}

/// Insert payload. `password_hash` is already hashed by the time it gets here.
#[derive(Debug, Clone)]
pub struct NewUser {
  pub name: String,
  pub email: String,
  pub password_hash: String,
  pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileView {
  pub id: Uuid,
  pub name: String,
  pub email: String,
  pub phone: Option<String>,
  pub created_at: DateTime<Utc>,
}

impl From<User> for ProfileView {
  fn from(user: User) -> Self {
    Self {
      id: user.id,
      name: user.name,
      email: user.email,
      phone: user.phone,
      created_at: user.created_at,
    }
  }
}
