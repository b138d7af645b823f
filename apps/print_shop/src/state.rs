// print_shop/src/state.rs
use crate::config::AppConfig;
use crate::db::Repositories;
use crate::services::{ContactService, CredentialService, FileStore, OrderService};
use printshop_core::SessionIssuer;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
  pub credentials: CredentialService,
  pub orders: OrderService,
  pub contact: ContactService,
  pub files: Arc<dyn FileStore>,
  pub sessions: Arc<SessionIssuer>,
  pub config: Arc<AppConfig>, // Share loaded config
}

impl AppState {
  pub fn new(
    config: Arc<AppConfig>,
    repositories: Repositories,
    files: Arc<dyn FileStore>,
    sessions: Arc<SessionIssuer>,
  ) -> Self {
    Self {
      credentials: CredentialService::new(repositories.users),
      orders: OrderService::new(repositories.orders),
      contact: ContactService::new(repositories.messages),
      files,
      sessions,
      config,
    }
  }
}
