//! Message handlers: anonymous delivery plus the owner's mailbox.

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::mailbox::MailboxService;
use crate::web::dto::{ApiResponse, MessageItem, SendMessageRequest, ValidatedJson};
use crate::web::error::ApiError;
use crate::web::middleware::AuthUser;

use super::AppState;

/// POST /api/send-message - Deliver an anonymous message.
///
/// Open to unauthenticated callers; nothing about the sender is stored.
pub async fn send_message(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<SendMessageRequest>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    MailboxService::new(state.db.pool())
        .deliver(&req.username, &req.content)
        .await?;

    Ok(Json(ApiResponse::success("Message sent successfully")))
}

/// GET /api/get-messages - The caller's messages, newest first.
pub async fn get_messages(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
) -> Result<Json<ApiResponse<Vec<MessageItem>>>, ApiError> {
    let messages = MailboxService::new(state.db.pool()).list(claims.sub).await?;
    let items: Vec<MessageItem> = messages.iter().map(MessageItem::from).collect();

    Ok(Json(ApiResponse::with_data(
        "Messages retrieved successfully",
        items,
    )))
}

/// DELETE /api/delete-message/:id - Delete one of the caller's messages.
///
/// Ids outside the caller's mailbox answer 404, same as missing ids.
pub async fn delete_message(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Path(message_id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    MailboxService::new(state.db.pool())
        .delete(claims.sub, message_id)
        .await?;

    Ok(Json(ApiResponse::success("Message deleted successfully")))
}
