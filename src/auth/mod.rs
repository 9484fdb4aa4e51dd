//! Authentication module for whisperbox.
//!
//! This module provides password hashing and credentials sign-in.

mod credentials;
mod password;

pub use credentials::{authenticate, ACCOUNT_NOT_VERIFIED, INVALID_CREDENTIALS};
pub use password::{
    hash_password, validate_password, verify_password, PasswordError, MAX_PASSWORD_LENGTH,
    MIN_PASSWORD_LENGTH,
};
