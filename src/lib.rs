//! whisperbox - Anonymous feedback service
//!
//! An HTTP JSON service where registered accounts receive anonymous
//! messages through a public per-user link. Accounts are verified by an
//! emailed code; owners can pause delivery, list their mailbox newest
//! first, and delete what they have received.

pub mod account;
pub mod auth;
pub mod config;
pub mod db;
pub mod email;
pub mod error;
pub mod logging;
pub mod mailbox;
pub mod web;

pub use auth::{
    authenticate, hash_password, validate_password, verify_password, PasswordError,
    ACCOUNT_NOT_VERIFIED, INVALID_CREDENTIALS, MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH,
};
pub use config::Config;
pub use db::{Database, DbPool, NewUser, User, UserRepository, UserUpdate};
pub use error::{Result, WhisperError};
pub use web::WebServer;
