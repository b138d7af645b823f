// print_shop/tests/common/mod.rs
#![allow(dead_code)] // Not every test binary uses every helper.

use actix_web::web;
use chrono::{DateTime, TimeZone, Utc};
use print_shop::config::AppConfig;
use print_shop::db::{InMemoryStore, Repositories};
use print_shop::services::LocalFileStore;
use print_shop::state::AppState;
use printshop_core::{ManualClock, SessionIssuer};
use std::collections::HashMap;
use std::sync::Arc;
use tempfile::TempDir;
use tracing::Level;

pub const SHOP_KEY: &str = "shop-secret";
pub const MAX_UPLOAD_BYTES: usize = 1024;
pub const BOUNDARY: &str = "----printshop-test-boundary";

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

pub fn t0() -> DateTime<Utc> {
  Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
}

pub struct TestContext {
  pub state: web::Data<AppState>,
  pub clock: Arc<ManualClock>,
  pub store: Arc<InMemoryStore>,
  pub uploads: TempDir,
}

pub async fn test_context() -> TestContext {
  test_context_with(Some(SHOP_KEY)).await
}

/// Full application state over the in-memory store, a temp upload dir and a
/// manual clock starting at `t0()`.
pub async fn test_context_with(shop_key: Option<&str>) -> TestContext {
  setup_tracing();
  let uploads = TempDir::new().expect("temp upload dir");

  let mut vars = HashMap::from([
    ("DATABASE_URL".to_string(), "postgres://unused/print_shop".to_string()),
    ("JWT_SECRET".to_string(), "integration-secret".to_string()),
    ("UPLOAD_DIR".to_string(), uploads.path().display().to_string()),
    ("MAX_UPLOAD_BYTES".to_string(), MAX_UPLOAD_BYTES.to_string()),
  ]);
  if let Some(key) = shop_key {
    vars.insert("SHOP_API_KEY".to_string(), key.to_string());
  }
  let config = Arc::new(AppConfig::from_lookup(|name| vars.get(name).cloned()).expect("test config"));

  let clock = Arc::new(ManualClock::new(t0()));
  let sessions = SessionIssuer::new(config.jwt_secret.as_bytes(), clock.clone()).expect("issuer");
  let files = LocalFileStore::open(&config.upload_dir).await.expect("file store");

  let store = Arc::new(InMemoryStore::new());
  let repositories = Repositories {
    users: store.clone(),
    orders: store.clone(),
    messages: store.clone(),
  };

  let state = web::Data::new(AppState::new(config, repositories, Arc::new(files), Arc::new(sessions)));
  TestContext {
    state,
    clock,
    store,
    uploads,
  }
}

/// Builds the service under test from a `TestContext`.
macro_rules! spawn_app {
  ($ctx:expr) => {
    actix_web::test::init_service(
      actix_web::App::new()
        .app_data($ctx.state.clone())
        .configure(print_shop::web::configure_app_routes),
    )
    .await
  };
}

pub enum Part<'a> {
  Text(&'a str, &'a str),
  File(&'a str, &'a str, &'a [u8]),
}

/// Hand-assembled `multipart/form-data` body using `BOUNDARY`.
pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
  let mut body = Vec::new();
  for part in parts {
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    match part {
      Part::Text(name, value) => {
        body.extend_from_slice(format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes());
        body.extend_from_slice(value.as_bytes());
      }
      Part::File(name, file_name, contents) => {
        body.extend_from_slice(
          format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: application/octet-stream\r\n\r\n",
            name, file_name
          )
          .as_bytes(),
        );
        body.extend_from_slice(contents);
      }
    }
    body.extend_from_slice(b"\r\n");
  }
  body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
  body
}

pub fn multipart_content_type() -> String {
  format!("multipart/form-data; boundary={}", BOUNDARY)
}

pub fn bearer(token: &str) -> (&'static str, String) {
  ("Authorization", format!("Bearer {}", token))
}

/// Registers a customer directly through the service layer and mints a token.
pub async fn signed_up(ctx: &TestContext, email: &str) -> (printshop_core::UserId, String) {
  let user = ctx
    .state
    .credentials
    .register(print_shop::services::Registration {
      name: "Test Customer".to_string(),
      email: email.to_string(),
      password: "correct horse".to_string(),
      phone: None,
    })
    .await
    .expect("registration");
  let token = ctx.state.sessions.issue(user.id, &user.email).expect("token");
  (user.id, token)
}

pub async fn body_json<B>(resp: actix_web::dev::ServiceResponse<B>) -> serde_json::Value
where
  B: actix_web::body::MessageBody,
{
  actix_web::test::read_body_json(resp).await
}
