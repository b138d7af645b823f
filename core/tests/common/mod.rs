// tests/common/mod.rs
#![allow(dead_code)] // Not every test binary uses every helper.

use chrono::{DateTime, TimeZone, Utc};
use printshop_core::{ManualClock, NewOrder, Order, OrderStatus, SessionIssuer};
use std::sync::Arc;
use tracing::Level;
use uuid::Uuid;

pub const TEST_SECRET: &[u8] = b"test-signing-secret";

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

pub fn issuer_at(start: DateTime<Utc>) -> (SessionIssuer, Arc<ManualClock>) {
  let clock = Arc::new(ManualClock::new(start));
  let issuer = SessionIssuer::new(TEST_SECRET, clock.clone()).expect("issuer");
  (issuer, clock)
}

pub fn order_with_status(user_id: Uuid, status: OrderStatus, total_price: i32) -> Order {
  let mut order = NewOrder {
    user_id,
    service_type: "printing".to_string(),
    material: printshop_core::Material::Pla,
    description: "bracket".to_string(),
    needs_design: false,
    file_path: None,
  }
  .into_order(Uuid::new_v4(), t0());
  order.status = status;
  order.total_price = total_price;
  order
}
