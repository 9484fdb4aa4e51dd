//! Account lifecycle handlers: signup, verification, and settings.

use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;
use validator::Validate;

use crate::account::{self, USERNAME_TAKEN};
use crate::web::dto::{
    AcceptMessagesData, AcceptMessagesRequest, ApiResponse, CheckUsernameQuery, SignUpRequest,
    ValidatedJson, VerifyCodeRequest,
};
use crate::web::error::ApiError;
use crate::web::middleware::AuthUser;

use super::AppState;

/// POST /api/sign-up - Register a new account and email a verification code.
pub async fn sign_up(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<SignUpRequest>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    account::sign_up(
        state.db.pool(),
        state.mailer.as_ref(),
        &req.username,
        &req.email,
        &req.password,
        state.code_expiry_mins,
    )
    .await?;

    Ok(Json(ApiResponse::success(
        "User registered successfully. Please verify your email",
    )))
}

/// GET /api/check-username-unique - Check whether a username is free.
///
/// Answers 200 either way; a taken name is an expected outcome, not an
/// error.
pub async fn check_username_unique(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CheckUsernameQuery>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    query.validate().map_err(ApiError::from_validation_errors)?;

    let available = account::is_username_available(state.db.pool(), &query.username).await?;
    if available {
        Ok(Json(ApiResponse::success("Username is available")))
    } else {
        Ok(Json(ApiResponse::failure(USERNAME_TAKEN)))
    }
}

/// POST /api/verify-code - Consume an emailed verification code.
pub async fn verify_code(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<VerifyCodeRequest>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    account::verify_code(state.db.pool(), &req.username, &req.code).await?;

    Ok(Json(ApiResponse::success("Account verified successfully")))
}

/// GET /api/accept-messages - Current accept-messages flag.
///
/// Reads the store rather than the token claims, which may predate a
/// toggle.
pub async fn accept_messages_status(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
) -> Result<Json<ApiResponse<AcceptMessagesData>>, ApiError> {
    let user = account::get_user(state.db.pool(), claims.sub).await?;

    Ok(Json(ApiResponse::with_data(
        "Message acceptance status retrieved successfully",
        AcceptMessagesData {
            is_accepting_messages: user.is_accepting_messages,
        },
    )))
}

/// POST /api/accept-messages - Toggle whether the mailbox accepts messages.
pub async fn update_accept_messages(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    ValidatedJson(req): ValidatedJson<AcceptMessagesRequest>,
) -> Result<Json<ApiResponse<AcceptMessagesData>>, ApiError> {
    let user =
        account::set_accepting_messages(state.db.pool(), claims.sub, req.accept_messages).await?;

    Ok(Json(ApiResponse::with_data(
        "Message acceptance status updated successfully",
        AcceptMessagesData {
            is_accepting_messages: user.is_accepting_messages,
        },
    )))
}
