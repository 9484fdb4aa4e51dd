//! Mailbox service for whisperbox.
//!
//! High-level message operations: anonymous delivery with accept-flag
//! gating, owner-scoped listing and deletion.

use tracing::info;

use crate::db::{DbPool, UserRepository};
use crate::error::{Result, WhisperError};

use super::repository::MessageRepository;
use super::types::{Message, NewMessage, MAX_CONTENT_LENGTH, MIN_CONTENT_LENGTH};

/// Message returned when the recipient's mailbox is closed.
pub const NOT_ACCEPTING: &str = "User is not accepting messages";

/// Service for mailbox operations.
pub struct MailboxService<'a> {
    pool: &'a DbPool,
}

impl<'a> MailboxService<'a> {
    /// Create a new MailboxService with the given database pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Deliver an anonymous message to a user's mailbox.
    ///
    /// Nothing about the sender is recorded.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Content is outside the 10-300 character range
    /// - The recipient doesn't exist
    /// - The recipient is not accepting messages (also when the flag flips
    ///   concurrently with delivery)
    pub async fn deliver(&self, recipient_username: &str, content: &str) -> Result<Message> {
        let length = content.chars().count();
        if !(MIN_CONTENT_LENGTH..=MAX_CONTENT_LENGTH).contains(&length) {
            return Err(WhisperError::Validation(format!(
                "Message content must be {MIN_CONTENT_LENGTH} to {MAX_CONTENT_LENGTH} characters"
            )));
        }

        let user_repo = UserRepository::new(self.pool);
        let recipient = user_repo
            .get_by_username(recipient_username)
            .await?
            .ok_or_else(|| WhisperError::NotFound("User".to_string()))?;

        if !recipient.is_accepting_messages {
            return Err(WhisperError::Forbidden(NOT_ACCEPTING.to_string()));
        }

        let message_repo = MessageRepository::new(self.pool);
        let message = message_repo
            .append(&NewMessage::new(recipient.id, content))
            .await?
            // The insert re-checks the flag; a concurrent toggle-off lands here
            .ok_or_else(|| WhisperError::Forbidden(NOT_ACCEPTING.to_string()))?;

        info!(
            recipient = %recipient.username,
            message_id = message.id,
            "Anonymous message delivered"
        );

        Ok(message)
    }

    /// List the user's messages, newest first.
    pub async fn list(&self, user_id: i64) -> Result<Vec<Message>> {
        let messages = MessageRepository::new(self.pool)
            .list_for_user(user_id)
            .await?;
        Ok(messages)
    }

    /// Delete one of the user's own messages.
    ///
    /// A message id under another user's mailbox reports the same as a
    /// missing id.
    pub async fn delete(&self, user_id: i64, message_id: i64) -> Result<()> {
        let deleted = MessageRepository::new(self.pool)
            .delete_for_user(user_id, message_id)
            .await?;

        if !deleted {
            return Err(WhisperError::NotFound("Message".to_string()));
        }

        info!(user_id = user_id, message_id = message_id, "Message deleted");
        Ok(())
    }
}
