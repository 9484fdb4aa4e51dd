//! Request DTOs for the whisperbox API.
//!
//! Bodies arrive as camelCase JSON and are checked by `ValidatedJson`
//! before a handler sees them.

use serde::Deserialize;
use validator::Validate;

use super::validation::{digits_only, username_charset};

/// Sign-up request.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    /// Desired username.
    #[validate(
        length(min = 2, max = 20, message = "Username must be 2 to 20 characters"),
        custom(function = username_charset)
    )]
    pub username: String,
    /// Email address the verification code is sent to.
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    /// Plaintext password.
    #[validate(length(min = 8, max = 128, message = "Password must be 8 to 128 characters"))]
    pub password: String,
}

/// Verification code submission.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VerifyCodeRequest {
    /// Account being verified.
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    /// The emailed 6-digit code.
    #[validate(
        length(equal = 6, message = "Code must be exactly 6 digits"),
        custom(function = digits_only)
    )]
    pub code: String,
}

/// Sign-in request. The identifier is a username or an email address.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignInRequest {
    #[validate(length(min = 1, message = "Identifier is required"))]
    pub identifier: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Accept-messages toggle request.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AcceptMessagesRequest {
    pub accept_messages: bool,
}

/// Anonymous message submission.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    /// Recipient username.
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    /// Message text.
    #[validate(length(min = 10, max = 300, message = "Message content must be 10 to 300 characters"))]
    pub content: String,
}

/// Query parameters for the username availability check.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CheckUsernameQuery {
    #[validate(
        length(min = 2, max = 20, message = "Username must be 2 to 20 characters"),
        custom(function = username_charset)
    )]
    pub username: String,
}
