// print_shop/src/services/contact_service.rs

use std::sync::Arc;
use tracing::{info, instrument};

use crate::db::MessageRepository;
use crate::errors::{AppError, Result};
use crate::models::{Message, NewMessage};
use crate::services::credential_service::{non_blank, validate_email};

/// Append-only intake for the public contact form.
#[derive(Clone)]
pub struct ContactService {
  messages: Arc<dyn MessageRepository>,
}

impl ContactService {
  pub fn new(messages: Arc<dyn MessageRepository>) -> Self {
    Self { messages }
  }

  #[instrument(name = "contact::submit", skip_all)]
  pub async fn submit(&self, name: &str, email: &str, subject: Option<String>, message: &str) -> Result<Message> {
    if name.trim().is_empty() {
      return Err(AppError::Validation("Name is required.".to_string()));
    }
    validate_email(email)?;
    if message.trim().is_empty() {
      return Err(AppError::Validation("Message is required.".to_string()));
    }

    let stored = self
      .messages
      .insert_message(NewMessage {
        name: name.trim().to_string(),
        email: email.trim().to_string(),
        subject: non_blank(subject),
        message: message.to_string(),
      })
      .await?;
    info!(message_id = %stored.id, "Contact message stored.");
    Ok(stored)
  }
}
