//! User repository for whisperbox.
//!
//! This module provides CRUD operations for users in the database.

use sqlx::{QueryBuilder, SqlitePool};

use super::user::{NewUser, User, UserUpdate};
use crate::{Result, WhisperError};

const USER_COLUMNS: &str = "id, username, email, password_hash, verify_code, \
     verify_code_expires_at, is_verified, is_accepting_messages, created_at";

/// Repository for user CRUD operations.
pub struct UserRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> UserRepository<'a> {
    /// Create a new UserRepository with the given database pool reference.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new user in the database.
    ///
    /// Returns the created user with the assigned ID.
    pub async fn create(&self, new_user: &NewUser) -> Result<User> {
        let result = sqlx::query(
            "INSERT INTO users (username, email, password_hash, verify_code, verify_code_expires_at)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&new_user.username)
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .bind(&new_user.verify_code)
        .bind(&new_user.verify_code_expires_at)
        .execute(self.pool)
        .await
        .map_err(|e| WhisperError::Database(e.to_string()))?;

        let id = result.last_insert_rowid();
        self.get_by_id(id)
            .await?
            .ok_or_else(|| WhisperError::NotFound("User".to_string()))
    }

    /// Get a user by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<User>> {
        let result = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| WhisperError::Database(e.to_string()))?;

        Ok(result)
    }

    /// Get a user by username (exact match).
    pub async fn get_by_username(&self, username: &str) -> Result<Option<User>> {
        let result = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = ?"
        ))
        .bind(username)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| WhisperError::Database(e.to_string()))?;

        Ok(result)
    }

    /// Get a user by email (exact match).
    pub async fn get_by_email(&self, email: &str) -> Result<Option<User>> {
        let result = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = ?"
        ))
        .bind(email)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| WhisperError::Database(e.to_string()))?;

        Ok(result)
    }

    /// Get a user by identifier, matching either username or email.
    pub async fn get_by_identifier(&self, identifier: &str) -> Result<Option<User>> {
        let result = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = ? OR email = ?"
        ))
        .bind(identifier)
        .bind(identifier)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| WhisperError::Database(e.to_string()))?;

        Ok(result)
    }

    /// Update a user by ID.
    ///
    /// Only fields that are set in the update will be modified.
    /// Returns the updated user, or None if not found.
    pub async fn update(&self, id: i64, update: &UserUpdate) -> Result<Option<User>> {
        if update.is_empty() {
            return self.get_by_id(id).await;
        }

        let mut query: QueryBuilder<sqlx::Sqlite> = QueryBuilder::new("UPDATE users SET ");
        let mut separated = query.separated(", ");

        if let Some(ref password_hash) = update.password_hash {
            separated.push("password_hash = ");
            separated.push_bind_unseparated(password_hash);
        }
        if let Some(ref verify_code) = update.verify_code {
            separated.push("verify_code = ");
            separated.push_bind_unseparated(verify_code.clone());
        }
        if let Some(ref expires_at) = update.verify_code_expires_at {
            separated.push("verify_code_expires_at = ");
            separated.push_bind_unseparated(expires_at.clone());
        }
        if let Some(is_verified) = update.is_verified {
            separated.push("is_verified = ");
            separated.push_bind_unseparated(is_verified);
        }
        if let Some(accepting) = update.is_accepting_messages {
            separated.push("is_accepting_messages = ");
            separated.push_bind_unseparated(accepting);
        }

        query.push(" WHERE id = ");
        query.push_bind(id);

        let result = query
            .build()
            .execute(self.pool)
            .await
            .map_err(|e| WhisperError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.get_by_id(id).await
    }

    /// Mark a user as verified, clearing the consumed code and its expiry.
    ///
    /// Returns true if the user existed.
    pub async fn mark_verified(&self, id: i64) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE users
             SET is_verified = 1, verify_code = NULL, verify_code_expires_at = NULL
             WHERE id = ?",
        )
        .bind(id)
        .execute(self.pool)
        .await
        .map_err(|e| WhisperError::Database(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    /// Check if a username is already taken (exact match).
    pub async fn username_exists(&self, username: &str) -> Result<bool> {
        let exists: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM users WHERE username = ?)")
                .bind(username)
                .fetch_one(self.pool)
                .await
                .map_err(|e| WhisperError::Database(e.to_string()))?;
        Ok(exists.0)
    }

    /// Count all users.
    pub async fn count(&self) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(self.pool)
            .await
            .map_err(|e| WhisperError::Database(e.to_string()))?;
        Ok(count.0)
    }
}
