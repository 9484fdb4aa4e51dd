//! API handlers for the whisperbox service.

pub mod account;
pub mod auth;
pub mod messages;

pub use account::*;
pub use auth::*;
pub use messages::*;

use jsonwebtoken::{encode, EncodingKey, Header};
use std::sync::Arc;

use crate::db::{Database, User};
use crate::email::VerificationMailer;
use crate::web::error::ApiError;
use crate::web::middleware::JwtClaims;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database handle. The underlying pool is already thread-safe.
    pub db: Database,
    /// JWT encoding key.
    pub encoding_key: EncodingKey,
    /// Access token expiry in seconds.
    pub access_token_expiry: u64,
    /// Verification code lifetime in minutes.
    pub code_expiry_mins: i64,
    /// Verification code delivery.
    pub mailer: Arc<dyn VerificationMailer>,
}

impl AppState {
    /// Create a new application state.
    pub fn new(
        db: Database,
        jwt_secret: &str,
        access_token_expiry: u64,
        code_expiry_mins: i64,
        mailer: Arc<dyn VerificationMailer>,
    ) -> Self {
        Self {
            db,
            encoding_key: EncodingKey::from_secret(jwt_secret.as_bytes()),
            access_token_expiry,
            code_expiry_mins,
            mailer,
        }
    }

    /// Generate an access token for a user.
    pub fn generate_access_token(&self, user: &User) -> Result<String, ApiError> {
        let now = chrono::Utc::now().timestamp() as u64;
        let claims = JwtClaims {
            sub: user.id,
            username: user.username.clone(),
            is_verified: user.is_verified,
            is_accepting_messages: user.is_accepting_messages,
            iat: now,
            exp: now + self.access_token_expiry,
            jti: uuid::Uuid::new_v4().to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!("Failed to encode JWT: {}", e);
            ApiError::internal("Failed to generate token")
        })
    }
}
