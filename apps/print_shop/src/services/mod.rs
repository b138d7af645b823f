// print_shop/src/services/mod.rs

//! Application services. Each wraps the repository it needs and owns one
//! slice of the business rules.

pub mod auth_service;
pub mod contact_service;
pub mod credential_service;
pub mod file_store;
pub mod order_service;

pub use contact_service::ContactService;
pub use credential_service::{CredentialService, Registration};
pub use file_store::{FileStore, LocalFileStore};
pub use order_service::{Dashboard, OrderService, OrderSubmission};
