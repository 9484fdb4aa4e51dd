//! Validation utilities for Web API DTOs.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::web::error::ApiError;

/// A JSON extractor that validates the request body.
///
/// This extractor deserializes the request body as JSON and then validates it
/// using the `validator` crate. Malformed JSON and failed validation both
/// answer with a 400 envelope.
///
/// # Example
///
/// ```ignore
/// use whisperbox::web::dto::ValidatedJson;
///
/// async fn sign_up(
///     ValidatedJson(payload): ValidatedJson<SignUpRequest>,
/// ) -> Result<Json<ApiResponse<()>>, ApiError> {
///     // payload is already validated
///     // ...
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        // First, extract the JSON body
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| ApiError::bad_request(format!("Invalid JSON: {}", e)))?;

        // Then, validate the deserialized value
        value.validate().map_err(ApiError::from_validation_errors)?;

        Ok(ValidatedJson(value))
    }
}

// ============================================================================
// Custom Validators
// ============================================================================

/// Validate that a username contains only letters, digits, and underscores.
pub fn username_charset(value: &str) -> Result<(), validator::ValidationError> {
    if !value.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(validator::ValidationError::new("username_charset")
            .with_message("Username may only contain letters, digits, and underscores".into()));
    }
    Ok(())
}

/// Validate that a verification code is made of ASCII digits only.
pub fn digits_only(value: &str) -> Result<(), validator::ValidationError> {
    if !value.chars().all(|c| c.is_ascii_digit()) {
        return Err(validator::ValidationError::new("digits_only")
            .with_message("Code must contain only digits".into()));
    }
    Ok(())
}
