// printshop_core/src/clock.rs

//! Time source seam. Token expiry is decided against a `Clock` rather than the
//! system time directly so the 24h boundary can be exercised in tests.

use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;

pub trait Clock: Send + Sync {
  fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
  fn now(&self) -> DateTime<Utc> {
    Utc::now()
  }
}

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
  current: Mutex<DateTime<Utc>>,
}

impl ManualClock {
  pub fn new(start: DateTime<Utc>) -> Self {
    Self {
      current: Mutex::new(start),
    }
  }

  pub fn set(&self, at: DateTime<Utc>) {
    *self.current.lock() = at;
  }

  pub fn advance(&self, by: Duration) {
    let mut guard = self.current.lock();
    *guard += by;
  }
}

impl Clock for ManualClock {
  fn now(&self) -> DateTime<Utc> {
    *self.current.lock()
  }
}
