//! Mailbox types for whisperbox.

/// Minimum length for message content (characters).
pub const MIN_CONTENT_LENGTH: usize = 10;

/// Maximum length for message content (characters).
pub const MAX_CONTENT_LENGTH: usize = 300;

/// An anonymous message in a user's mailbox.
///
/// No sender is recorded anywhere; the row only ties the content to the
/// receiving user.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Message {
    /// Message ID.
    pub id: i64,
    /// Receiving user ID.
    pub user_id: i64,
    /// Message content.
    pub content: String,
    /// When the message was appended.
    pub created_at: String,
}

/// New message for delivery.
#[derive(Debug, Clone)]
pub struct NewMessage {
    /// Receiving user ID.
    pub recipient_id: i64,
    /// Message content.
    pub content: String,
}

impl NewMessage {
    /// Create a new message.
    pub fn new(recipient_id: i64, content: impl Into<String>) -> Self {
        Self {
            recipient_id,
            content: content.into(),
        }
    }
}
