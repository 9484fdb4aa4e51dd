//! Credentials sign-in for whisperbox.
//!
//! This module authenticates users by identifier and password and
//! enforces the email-verification requirement.

use tracing::{info, warn};

use crate::auth::verify_password;
use crate::db::{DbPool, User, UserRepository};
use crate::error::{Result, WhisperError};

/// Message returned for a missing user or a wrong password.
///
/// Both cases share one message so a caller cannot probe which
/// identifiers are registered.
pub const INVALID_CREDENTIALS: &str = "Invalid username or password";

/// Message returned when the password is correct but the account
/// has not completed email verification.
pub const ACCOUNT_NOT_VERIFIED: &str = "Account is not verified";

/// Authenticate a user by identifier (username or email) and password.
///
/// This function:
/// 1. Looks up the user by username or email in a single query
/// 2. Verifies the password against the stored Argon2 hash
/// 3. Rejects accounts that have not completed verification
///
/// The password is always checked before the verification status, so an
/// unverified account is only revealed to a caller holding the correct
/// password.
///
/// # Arguments
///
/// * `pool` - The database pool
/// * `identifier` - Username or email address
/// * `password` - Plain-text password to verify
///
/// # Returns
///
/// The authenticated user on success, or `WhisperError::Auth` on failure.
pub async fn authenticate(pool: &DbPool, identifier: &str, password: &str) -> Result<User> {
    let repo = UserRepository::new(pool);

    let user = match repo.get_by_identifier(identifier).await? {
        Some(user) => user,
        None => {
            warn!(identifier = %identifier, "Sign-in failed: user not found");
            return Err(WhisperError::Auth(INVALID_CREDENTIALS.to_string()));
        }
    };

    if verify_password(password, &user.password_hash).is_err() {
        warn!(username = %user.username, "Sign-in failed: wrong password");
        return Err(WhisperError::Auth(INVALID_CREDENTIALS.to_string()));
    }

    if !user.is_verified {
        warn!(username = %user.username, "Sign-in failed: account not verified");
        return Err(WhisperError::Auth(ACCOUNT_NOT_VERIFIED.to_string()));
    }

    info!(
        username = %user.username,
        user_id = user.id,
        "Sign-in successful"
    );

    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::hash_password;
    use crate::db::{Database, NewUser};

    async fn setup_user(
        db: &Database,
        username: &str,
        email: &str,
        password: &str,
        verified: bool,
    ) -> User {
        let repo = UserRepository::new(db.pool());
        let hash = hash_password(password).unwrap();
        let user = repo
            .create(&NewUser::new(username, email, &hash))
            .await
            .unwrap();
        if verified {
            repo.mark_verified(user.id).await.unwrap();
            repo.get_by_id(user.id).await.unwrap().unwrap()
        } else {
            user
        }
    }

    #[tokio::test]
    async fn test_authenticate_by_username() {
        let db = Database::open_in_memory().await.unwrap();
        setup_user(&db, "alice", "alice@example.com", "password123", true).await;

        let user = authenticate(db.pool(), "alice", "password123")
            .await
            .unwrap();
        assert_eq!(user.username, "alice");
        assert!(user.is_verified);
    }

    #[tokio::test]
    async fn test_authenticate_by_email() {
        let db = Database::open_in_memory().await.unwrap();
        setup_user(&db, "alice", "alice@example.com", "password123", true).await;

        let user = authenticate(db.pool(), "alice@example.com", "password123")
            .await
            .unwrap();
        assert_eq!(user.username, "alice");
    }

    #[tokio::test]
    async fn test_authenticate_wrong_password() {
        let db = Database::open_in_memory().await.unwrap();
        setup_user(&db, "alice", "alice@example.com", "password123", true).await;

        let result = authenticate(db.pool(), "alice", "wrong_password").await;
        match result {
            Err(WhisperError::Auth(msg)) => assert_eq!(msg, INVALID_CREDENTIALS),
            other => panic!("expected auth error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_authenticate_unknown_identifier() {
        let db = Database::open_in_memory().await.unwrap();
        setup_user(&db, "alice", "alice@example.com", "password123", true).await;

        let result = authenticate(db.pool(), "nobody", "password123").await;
        match result {
            Err(WhisperError::Auth(msg)) => assert_eq!(msg, INVALID_CREDENTIALS),
            other => panic!("expected auth error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unknown_user_and_wrong_password_same_message() {
        let db = Database::open_in_memory().await.unwrap();
        setup_user(&db, "alice", "alice@example.com", "password123", true).await;

        let unknown = authenticate(db.pool(), "nobody", "password123").await;
        let wrong = authenticate(db.pool(), "alice", "wrong_password").await;

        let unknown_msg = match unknown {
            Err(WhisperError::Auth(msg)) => msg,
            other => panic!("expected auth error, got {other:?}"),
        };
        let wrong_msg = match wrong {
            Err(WhisperError::Auth(msg)) => msg,
            other => panic!("expected auth error, got {other:?}"),
        };
        assert_eq!(unknown_msg, wrong_msg);
    }

    #[tokio::test]
    async fn test_authenticate_unverified_account() {
        let db = Database::open_in_memory().await.unwrap();
        setup_user(&db, "alice", "alice@example.com", "password123", false).await;

        let result = authenticate(db.pool(), "alice", "password123").await;
        match result {
            Err(WhisperError::Auth(msg)) => assert_eq!(msg, ACCOUNT_NOT_VERIFIED),
            other => panic!("expected auth error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unverified_with_wrong_password_stays_generic() {
        let db = Database::open_in_memory().await.unwrap();
        setup_user(&db, "alice", "alice@example.com", "password123", false).await;

        // Verification status must not leak to a caller without the password
        let result = authenticate(db.pool(), "alice", "wrong_password").await;
        match result {
            Err(WhisperError::Auth(msg)) => assert_eq!(msg, INVALID_CREDENTIALS),
            other => panic!("expected auth error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_authenticate_succeeds_after_verification() {
        let db = Database::open_in_memory().await.unwrap();
        let user = setup_user(&db, "alice", "alice@example.com", "password123", false).await;

        assert!(authenticate(db.pool(), "alice", "password123")
            .await
            .is_err());

        let repo = UserRepository::new(db.pool());
        repo.mark_verified(user.id).await.unwrap();

        assert!(authenticate(db.pool(), "alice", "password123")
            .await
            .is_ok());
    }
}
