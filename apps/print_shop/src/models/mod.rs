// print_shop/src/models/mod.rs

//! Rows as stored in the relational database, and the views derived from them.
//! Order and summary types themselves come from `printshop_core`.

pub mod message;
pub mod order;
pub mod user;

pub use message::{Message, NewMessage};
pub use order::OrderRow;
pub use user::{NewUser, ProfileView, User};
