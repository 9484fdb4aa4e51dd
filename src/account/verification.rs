//! Account verification for whisperbox.
//!
//! New accounts receive a 6-digit code by email and stay unverified
//! until the code is entered before its expiry.

use chrono::{Duration, Utc};
use rand::Rng;
use tracing::{info, warn};

use crate::db::{DbPool, User, UserRepository, TIMESTAMP_FORMAT};
use crate::error::{Result, WhisperError};

/// Message returned when the submitted code does not match the stored one.
pub const INCORRECT_CODE: &str = "Incorrect verification code";

/// Generate a 6-digit numeric verification code.
pub fn generate_verification_code() -> String {
    rand::rng().random_range(100_000..1_000_000).to_string()
}

/// Compute the expiry timestamp for a code issued now.
pub fn code_expiry_timestamp(ttl_mins: i64) -> String {
    (Utc::now().naive_utc() + Duration::minutes(ttl_mins))
        .format(TIMESTAMP_FORMAT)
        .to_string()
}

/// Verify an account with the code sent to its email address.
///
/// Expiry is checked before the code itself: an expired code reports as
/// expired even when it would not have matched, so the caller knows to
/// request a fresh one. A consumed or never-issued code also reports as
/// expired.
///
/// # Returns
///
/// The verified user on success. `WhisperError::NotFound` for an unknown
/// username, `WhisperError::CodeExpired` past expiry,
/// `WhisperError::Validation` on mismatch.
pub async fn verify_code(pool: &DbPool, username: &str, code: &str) -> Result<User> {
    let repo = UserRepository::new(pool);

    let user = repo
        .get_by_username(username)
        .await?
        .ok_or_else(|| WhisperError::NotFound("User".to_string()))?;

    if user.verify_code_expired(Utc::now().naive_utc()) {
        warn!(username = %user.username, "Verification failed: code expired");
        return Err(WhisperError::CodeExpired);
    }

    match user.verify_code.as_deref() {
        Some(stored) if stored == code => {}
        _ => {
            warn!(username = %user.username, "Verification failed: code mismatch");
            return Err(WhisperError::Validation(INCORRECT_CODE.to_string()));
        }
    }

    if !repo.mark_verified(user.id).await? {
        return Err(WhisperError::NotFound("User".to_string()));
    }

    info!(
        username = %user.username,
        user_id = user.id,
        "Account verified"
    );

    repo.get_by_id(user.id)
        .await?
        .ok_or_else(|| WhisperError::NotFound("User".to_string()))
}
