//! Message repository for whisperbox.

use sqlx::SqlitePool;

use super::types::{Message, NewMessage};
use crate::{Result, WhisperError};

const MESSAGE_COLUMNS: &str = "id, user_id, content, created_at";

/// Repository for mailbox message operations.
pub struct MessageRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> MessageRepository<'a> {
    /// Create a new MessageRepository with the given database pool reference.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Append a message to the recipient's mailbox.
    ///
    /// The insert is gated on the recipient's accept flag in the same
    /// statement, so a toggle committed between the caller's check and the
    /// append still wins. Returns `None` when the recipient is missing or
    /// not accepting.
    pub async fn append(&self, message: &NewMessage) -> Result<Option<Message>> {
        let result = sqlx::query_as::<_, Message>(&format!(
            "INSERT INTO messages (user_id, content)
             SELECT id, ? FROM users WHERE id = ? AND is_accepting_messages = 1
             RETURNING {MESSAGE_COLUMNS}"
        ))
        .bind(&message.content)
        .bind(message.recipient_id)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| WhisperError::Database(e.to_string()))?;

        Ok(result)
    }

    /// Get a message by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Message>> {
        let result = sqlx::query_as::<_, Message>(&format!(
            "SELECT {MESSAGE_COLUMNS} FROM messages WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| WhisperError::Database(e.to_string()))?;

        Ok(result)
    }

    /// List a user's messages, newest first.
    pub async fn list_for_user(&self, user_id: i64) -> Result<Vec<Message>> {
        let result = sqlx::query_as::<_, Message>(&format!(
            "SELECT {MESSAGE_COLUMNS} FROM messages
             WHERE user_id = ?
             ORDER BY created_at DESC, id DESC"
        ))
        .bind(user_id)
        .fetch_all(self.pool)
        .await
        .map_err(|e| WhisperError::Database(e.to_string()))?;

        Ok(result)
    }

    /// Delete a message owned by the given user.
    ///
    /// The lookup is scoped to the owner, so an id under another user's
    /// mailbox deletes nothing. Returns whether a row was removed.
    pub async fn delete_for_user(&self, user_id: i64, message_id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM messages WHERE id = ? AND user_id = ?")
            .bind(message_id)
            .bind(user_id)
            .execute(self.pool)
            .await
            .map_err(|e| WhisperError::Database(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    /// Count a user's messages.
    pub async fn count_for_user(&self, user_id: i64) -> Result<i64> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM messages WHERE user_id = ?")
                .bind(user_id)
                .fetch_one(self.pool)
                .await
                .map_err(|e| WhisperError::Database(e.to_string()))?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{Database, NewUser, UserRepository, UserUpdate};

    async fn setup_user(db: &Database, username: &str, accepting: bool) -> i64 {
        let repo = UserRepository::new(db.pool());
        let email = format!("{username}@example.com");
        let user = repo
            .create(&NewUser::new(username, email, "$argon2id$fake"))
            .await
            .unwrap();
        if !accepting {
            repo.update(user.id, &UserUpdate::new().is_accepting_messages(false))
                .await
                .unwrap();
        }
        user.id
    }

    #[tokio::test]
    async fn test_append_to_accepting_user() {
        let db = Database::open_in_memory().await.unwrap();
        let user_id = setup_user(&db, "alice", true).await;
        let repo = MessageRepository::new(db.pool());

        let message = repo
            .append(&NewMessage::new(user_id, "an anonymous note for alice"))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(message.user_id, user_id);
        assert_eq!(message.content, "an anonymous note for alice");
        assert!(!message.created_at.is_empty());
    }

    #[tokio::test]
    async fn test_append_to_non_accepting_user() {
        let db = Database::open_in_memory().await.unwrap();
        let user_id = setup_user(&db, "alice", false).await;
        let repo = MessageRepository::new(db.pool());

        let result = repo
            .append(&NewMessage::new(user_id, "this should never land"))
            .await
            .unwrap();

        assert!(result.is_none());
        assert_eq!(repo.count_for_user(user_id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_append_to_missing_user() {
        let db = Database::open_in_memory().await.unwrap();
        let repo = MessageRepository::new(db.pool());

        let result = repo
            .append(&NewMessage::new(9999, "nobody lives at this address"))
            .await
            .unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_list_for_user_newest_first() {
        let db = Database::open_in_memory().await.unwrap();
        let user_id = setup_user(&db, "alice", true).await;
        let repo = MessageRepository::new(db.pool());

        let first = repo
            .append(&NewMessage::new(user_id, "the first of three notes"))
            .await
            .unwrap()
            .unwrap();
        let second = repo
            .append(&NewMessage::new(user_id, "the second of three notes"))
            .await
            .unwrap()
            .unwrap();
        let third = repo
            .append(&NewMessage::new(user_id, "the third of three notes"))
            .await
            .unwrap()
            .unwrap();

        let messages = repo.list_for_user(user_id).await.unwrap();
        assert_eq!(messages.len(), 3);
        // Same-second appends fall back to id ordering
        assert_eq!(messages[0].id, third.id);
        assert_eq!(messages[1].id, second.id);
        assert_eq!(messages[2].id, first.id);
    }

    #[tokio::test]
    async fn test_list_for_user_empty() {
        let db = Database::open_in_memory().await.unwrap();
        let user_id = setup_user(&db, "alice", true).await;
        let repo = MessageRepository::new(db.pool());

        let messages = repo.list_for_user(user_id).await.unwrap();
        assert!(messages.is_empty());
    }

    #[tokio::test]
    async fn test_list_for_user_scoped_to_owner() {
        let db = Database::open_in_memory().await.unwrap();
        let alice = setup_user(&db, "alice", true).await;
        let bob = setup_user(&db, "bob", true).await;
        let repo = MessageRepository::new(db.pool());

        repo.append(&NewMessage::new(alice, "a note only for alice"))
            .await
            .unwrap();
        repo.append(&NewMessage::new(bob, "a note only for bob!"))
            .await
            .unwrap();

        let messages = repo.list_for_user(alice).await.unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].content, "a note only for alice");
    }

    #[tokio::test]
    async fn test_delete_for_user() {
        let db = Database::open_in_memory().await.unwrap();
        let user_id = setup_user(&db, "alice", true).await;
        let repo = MessageRepository::new(db.pool());

        let message = repo
            .append(&NewMessage::new(user_id, "soon to be deleted note"))
            .await
            .unwrap()
            .unwrap();

        assert!(repo.delete_for_user(user_id, message.id).await.unwrap());
        assert!(repo.get_by_id(message.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_for_user_foreign_message() {
        let db = Database::open_in_memory().await.unwrap();
        let alice = setup_user(&db, "alice", true).await;
        let bob = setup_user(&db, "bob", true).await;
        let repo = MessageRepository::new(db.pool());

        let message = repo
            .append(&NewMessage::new(bob, "a note that belongs to bob"))
            .await
            .unwrap()
            .unwrap();

        // Alice cannot remove bob's message
        assert!(!repo.delete_for_user(alice, message.id).await.unwrap());
        assert!(repo.get_by_id(message.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_delete_for_user_missing_message() {
        let db = Database::open_in_memory().await.unwrap();
        let user_id = setup_user(&db, "alice", true).await;
        let repo = MessageRepository::new(db.pool());

        assert!(!repo.delete_for_user(user_id, 9999).await.unwrap());
    }

    #[tokio::test]
    async fn test_count_for_user() {
        let db = Database::open_in_memory().await.unwrap();
        let user_id = setup_user(&db, "alice", true).await;
        let repo = MessageRepository::new(db.pool());

        assert_eq!(repo.count_for_user(user_id).await.unwrap(), 0);

        repo.append(&NewMessage::new(user_id, "one counted message"))
            .await
            .unwrap();
        repo.append(&NewMessage::new(user_id, "two counted messages"))
            .await
            .unwrap();

        assert_eq!(repo.count_for_user(user_id).await.unwrap(), 2);
    }
}
