//! Session handlers: sign-in and the current-user lookup.

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::account;
use crate::auth::authenticate;
use crate::web::dto::{ApiResponse, SignInData, SignInRequest, UserInfo, ValidatedJson};
use crate::web::error::ApiError;
use crate::web::middleware::AuthUser;

use super::AppState;

/// POST /api/sign-in - Sign in with a username or email address.
pub async fn sign_in(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<SignInRequest>,
) -> Result<Json<ApiResponse<SignInData>>, ApiError> {
    let user = authenticate(state.db.pool(), &req.identifier, &req.password).await?;

    let access_token = state.generate_access_token(&user)?;
    let data = SignInData {
        access_token,
        expires_in: state.access_token_expiry,
        user: UserInfo::from(&user),
    };

    Ok(Json(ApiResponse::with_data("Signed in successfully", data)))
}

/// GET /api/me - Current user, read fresh from the store.
pub async fn me(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
) -> Result<Json<ApiResponse<UserInfo>>, ApiError> {
    let user = account::get_user(state.db.pool(), claims.sub).await?;

    Ok(Json(ApiResponse::with_data(
        "User retrieved successfully",
        UserInfo::from(&user),
    )))
}
