//! Database schema and migrations for whisperbox.
//!
//! This module contains all database migrations that will be applied
//! sequentially when the database is first opened or upgraded.

/// Database migrations.
///
/// Each migration is a SQL script that will be executed in order.
/// The schema_version table tracks which migrations have been applied.
pub const MIGRATIONS: &[&str] = &[
    // v1: Initial schema - users table
    r#"
-- Users table for authentication and account state
CREATE TABLE users (
    id                      INTEGER PRIMARY KEY AUTOINCREMENT,
    username                TEXT NOT NULL UNIQUE,
    email                   TEXT NOT NULL UNIQUE,
    password_hash           TEXT NOT NULL,           -- Argon2 hash
    verify_code             TEXT,                    -- emailed code, NULL once consumed
    verify_code_expires_at  TEXT,                    -- UTC 'YYYY-MM-DD HH:MM:SS', NULL once consumed
    is_verified             INTEGER NOT NULL DEFAULT 0,
    is_accepting_messages   INTEGER NOT NULL DEFAULT 1,
    created_at              TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX idx_users_username ON users(username);
CREATE INDEX idx_users_email ON users(email);
"#,
    // v2: Messages table for anonymous inboxes
    r#"
-- Anonymous messages; no sender column
CREATE TABLE messages (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id     INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    content     TEXT NOT NULL,
    created_at  TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX idx_messages_user_created ON messages(user_id, created_at);
"#,
];
