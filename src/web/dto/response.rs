//! Response DTOs for the whisperbox API.
//!
//! Every endpoint answers with the same envelope: `success`, a
//! human-readable `message`, and an optional `data` payload. Field names
//! are camelCase on the wire.

use serde::Serialize;

use crate::db::User;
use crate::mailbox::Message;

/// Uniform response envelope.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    /// Whether the request succeeded.
    pub success: bool,
    /// Human-readable outcome message.
    pub message: String,
    /// Optional payload, omitted from the JSON when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Successful envelope without a payload.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
        }
    }

    /// Successful envelope with a payload.
    pub fn with_data(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }

    /// Failed envelope.
    ///
    /// Also used with a 200 status where failure is an expected answer,
    /// such as a taken username on the availability check.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
        }
    }
}

/// Public view of a user account.
///
/// Never exposes the password hash or the pending verification code.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub is_verified: bool,
    pub is_accepting_messages: bool,
}

impl From<&User> for UserInfo {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            is_verified: user.is_verified,
            is_accepting_messages: user.is_accepting_messages,
        }
    }
}

/// Payload for a successful sign-in.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInData {
    /// Bearer token for the Authorization header.
    pub access_token: String,
    /// Token lifetime in seconds.
    pub expires_in: u64,
    /// The signed-in user.
    pub user: UserInfo,
}

/// Payload for the accept-messages endpoints.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AcceptMessagesData {
    pub is_accepting_messages: bool,
}

/// One received message, as shown to its owner.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageItem {
    pub id: i64,
    pub content: String,
    pub created_at: String,
}

impl From<&Message> for MessageItem {
    fn from(message: &Message) -> Self {
        Self {
            id: message.id,
            content: message.content.clone(),
            created_at: message.created_at.clone(),
        }
    }
}
