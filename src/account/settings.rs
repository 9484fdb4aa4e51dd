//! Account settings for whisperbox.

use tracing::info;

use crate::db::{DbPool, User, UserRepository, UserUpdate};
use crate::error::{Result, WhisperError};

/// Set whether the user's mailbox accepts new anonymous messages.
///
/// Idempotent; returns the user with the new flag applied. Stored
/// messages are unaffected.
pub async fn set_accepting_messages(
    pool: &DbPool,
    user_id: i64,
    accepting: bool,
) -> Result<User> {
    let repo = UserRepository::new(pool);

    let user = repo
        .update(user_id, &UserUpdate::new().is_accepting_messages(accepting))
        .await?
        .ok_or_else(|| WhisperError::NotFound("User".to_string()))?;

    info!(
        username = %user.username,
        user_id = user.id,
        accepting = accepting,
        "Accept-messages flag updated"
    );

    Ok(user)
}

/// Fetch a user by id, reading the current state from the store.
pub async fn get_user(pool: &DbPool, user_id: i64) -> Result<User> {
    let repo = UserRepository::new(pool);
    repo.get_by_id(user_id)
        .await?
        .ok_or_else(|| WhisperError::NotFound("User".to_string()))
}
