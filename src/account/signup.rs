//! User signup for whisperbox.
//!
//! This module provides account creation with email verification.

use tracing::{info, warn};

use crate::account::verification::{code_expiry_timestamp, generate_verification_code};
use crate::auth::{hash_password, PasswordError};
use crate::db::{DbPool, NewUser, User, UserRepository, UserUpdate};
use crate::email::VerificationMailer;
use crate::error::{Result, WhisperError};

/// Message returned when the username belongs to another account.
pub const USERNAME_TAKEN: &str = "Username is already taken";

/// Message returned when the email belongs to a verified account.
pub const EMAIL_REGISTERED: &str = "Email is already registered";

/// Register a new account, or refresh a pending one.
///
/// This function:
/// 1. Rejects a username held by any account with a different email
/// 2. Rejects an email held by a verified account
/// 3. For an email held by an unverified account, overwrites the password
///    and issues a fresh code, keeping the stored id and username
/// 4. Otherwise creates a new unverified account with a pending code
/// 5. Sends the verification email
///
/// A failed email send fails the signup but keeps the persisted row; the
/// caller can sign up again with the same email to get a new code.
///
/// # Returns
///
/// The created or refreshed user on success. No session is issued.
pub async fn sign_up(
    pool: &DbPool,
    mailer: &dyn VerificationMailer,
    username: &str,
    email: &str,
    password: &str,
    code_expiry_mins: i64,
) -> Result<User> {
    let repo = UserRepository::new(pool);

    if let Some(existing) = repo.get_by_username(username).await? {
        if existing.email != email {
            return Err(WhisperError::Conflict(USERNAME_TAKEN.to_string()));
        }
    }

    let password_hash = hash_password(password).map_err(|e| match e {
        PasswordError::TooShort | PasswordError::TooLong => {
            WhisperError::Validation(e.to_string())
        }
        other => WhisperError::Internal(other.to_string()),
    })?;

    let code = generate_verification_code();
    let expires_at = code_expiry_timestamp(code_expiry_mins);

    let user = match repo.get_by_email(email).await? {
        Some(existing) if existing.is_verified => {
            return Err(WhisperError::Conflict(EMAIL_REGISTERED.to_string()));
        }
        Some(existing) => {
            // Pending signup for this email; refresh it in place. The stored
            // id and username stay, only the secret material changes.
            let update = UserUpdate::new()
                .password_hash(&password_hash)
                .verify_code(Some(code.clone()))
                .verify_code_expires_at(Some(expires_at));

            let user = repo
                .update(existing.id, &update)
                .await?
                .ok_or_else(|| WhisperError::NotFound("User".to_string()))?;

            info!(
                username = %user.username,
                user_id = user.id,
                "Pending account refreshed with a new verification code"
            );
            user
        }
        None => {
            let new_user =
                NewUser::new(username, email, &password_hash).with_verify_code(&code, &expires_at);
            let user = repo.create(&new_user).await?;

            info!(
                username = %user.username,
                user_id = user.id,
                "New user registered"
            );
            user
        }
    };

    if let Err(e) = mailer
        .send_verification_code(&user.email, &user.username, &code)
        .await
    {
        // Row stays; a repeat signup against the unverified email recovers
        warn!(
            username = %user.username,
            user_id = user.id,
            "Verification email failed to send"
        );
        return Err(e);
    }

    Ok(user)
}

/// Check whether a username is free to register.
pub async fn is_username_available(pool: &DbPool, username: &str) -> Result<bool> {
    let repo = UserRepository::new(pool);
    Ok(!repo.username_exists(username).await?)
}
