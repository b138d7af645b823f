// src/lib.rs

//! printshop-core: the rules of the print shop order service, free of I/O.
//!
//! The crate holds the pieces whose behaviour has to be exact:
//!  - The pricing engine that turns a material and a design-service flag into a quote.
//!  - The order state machine (`pending -> processing -> completed`, `pending -> cancelled`).
//!  - The dashboard summary aggregate.
//!  - The session issuer that mints and verifies signed, 24h session tokens.
//!
//! Storage, HTTP and password hashing live in the application crate.

pub mod clock;
pub mod error;
pub mod order;
pub mod pricing;
pub mod session;

// --- Re-exports for the Public API ---

pub use crate::clock::{Clock, ManualClock, SystemClock};
pub use crate::error::{SessionError, TransitionError};
pub use crate::order::{NewOrder, Order, OrderId, OrderStatus, OrderSummary, UserId, RECENT_ORDERS_LIMIT};
pub use crate::pricing::{base_price, quote, Material, Quote, DEFAULT_BASE_PRICE, DESIGN_FEE};
pub use crate::session::{Claims, Principal, SessionIssuer, SESSION_TTL_HOURS};
