//! User model for whisperbox.
//!
//! This module defines the User row and the builder structs used to
//! create and update users.

use chrono::NaiveDateTime;

use super::TIMESTAMP_FORMAT;

/// User entity representing a registered account.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    /// Unique user ID.
    pub id: i64,
    /// Login username (unique, exact-match).
    pub username: String,
    /// Email address (unique).
    pub email: String,
    /// Password hash (Argon2).
    pub password_hash: String,
    /// Pending verification code (None once consumed).
    pub verify_code: Option<String>,
    /// Verification code expiry, UTC `%Y-%m-%d %H:%M:%S` (None once consumed).
    pub verify_code_expires_at: Option<String>,
    /// Whether the account has completed email verification.
    pub is_verified: bool,
    /// Whether the public link currently accepts new messages.
    pub is_accepting_messages: bool,
    /// Account creation timestamp.
    pub created_at: String,
}

impl User {
    /// Whether the stored verification code is past its expiry at `now`.
    ///
    /// A missing or unparseable expiry counts as expired.
    pub fn verify_code_expired(&self, now: NaiveDateTime) -> bool {
        match &self.verify_code_expires_at {
            Some(ts) => match NaiveDateTime::parse_from_str(ts, TIMESTAMP_FORMAT) {
                Ok(expiry) => now >= expiry,
                Err(_) => true,
            },
            None => true,
        }
    }
}

/// Data for creating a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Login username.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Password hash (should be pre-hashed with Argon2).
    pub password_hash: String,
    /// Pending verification code.
    pub verify_code: Option<String>,
    /// Verification code expiry.
    pub verify_code_expires_at: Option<String>,
}

impl NewUser {
    /// Create a new user with the required fields.
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password_hash: password_hash.into(),
            verify_code: None,
            verify_code_expires_at: None,
        }
    }

    /// Set the pending verification code and its expiry.
    pub fn with_verify_code(
        mut self,
        code: impl Into<String>,
        expires_at: impl Into<String>,
    ) -> Self {
        self.verify_code = Some(code.into());
        self.verify_code_expires_at = Some(expires_at.into());
        self
    }
}

/// Data for updating an existing user.
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    /// New password hash (if changing password).
    pub password_hash: Option<String>,
    /// New verification code (Some(None) clears it).
    pub verify_code: Option<Option<String>>,
    /// New verification code expiry (Some(None) clears it).
    pub verify_code_expires_at: Option<Option<String>>,
    /// New verified state.
    pub is_verified: Option<bool>,
    /// New accepting-messages state.
    pub is_accepting_messages: Option<bool>,
}

impl UserUpdate {
    /// Create an empty update.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set new password hash.
    pub fn password_hash(mut self, password_hash: impl Into<String>) -> Self {
        self.password_hash = Some(password_hash.into());
        self
    }

    /// Set or clear the verification code.
    pub fn verify_code(mut self, code: Option<String>) -> Self {
        self.verify_code = Some(code);
        self
    }

    /// Set or clear the verification code expiry.
    pub fn verify_code_expires_at(mut self, expires_at: Option<String>) -> Self {
        self.verify_code_expires_at = Some(expires_at);
        self
    }

    /// Set verified state.
    pub fn is_verified(mut self, is_verified: bool) -> Self {
        self.is_verified = Some(is_verified);
        self
    }

    /// Set accepting-messages state.
    pub fn is_accepting_messages(mut self, accepting: bool) -> Self {
        self.is_accepting_messages = Some(accepting);
        self
    }

    /// Check if any fields are set.
    pub fn is_empty(&self) -> bool {
        self.password_hash.is_none()
            && self.verify_code.is_none()
            && self.verify_code_expires_at.is_none()
            && self.is_verified.is_none()
            && self.is_accepting_messages.is_none()
    }
}
