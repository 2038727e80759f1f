//! Message endpoints
//!
//! Viewing a message is allowed for its sender and recipient only; marking
//! it read is allowed for the recipient only. The sender of a new message
//! is always the authenticated caller, never a field of the request body.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use crate::{
    error::AppError,
    middleware::AuthUser,
    models::{Message, MessageDetail},
    validation::required,
    AppState,
};

/// Request for sending a message
///
/// Fields are optional at the deserialization layer so that an absent key
/// and an empty value take the same validation path.
#[derive(Deserialize)]
pub struct SendMessageRequest {
    pub to_username: Option<String>,
    pub body: Option<String>,
}

/// Response wrapping a stored message
#[derive(Serialize)]
pub struct MessageResponse {
    pub message: Message,
}

/// Response wrapping a message with nested profiles
#[derive(Serialize)]
pub struct MessageDetailResponse {
    pub message: MessageDetail,
}

/// Get one message with nested from/to profiles
pub async fn get_message(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let message = state.message_repository.get(id).await?;

    if auth.username != message.from_user.username && auth.username != message.to_user.username {
        return Err(AppError::Unauthorized);
    }

    Ok(Json(MessageDetailResponse { message }))
}

/// Send a message to another user
pub async fn send_message(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(payload): Json<SendMessageRequest>,
) -> Result<impl IntoResponse, AppError> {
    let to_username = required("to_username", payload.to_username.as_deref())?;
    let body = required("body", payload.body.as_deref())?;

    let message = state
        .message_repository
        .create(&auth.username, to_username, body)
        .await?;

    Ok((StatusCode::CREATED, Json(MessageResponse { message })))
}

/// Mark a message read (recipient only)
pub async fn mark_message_read(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let message = state.message_repository.get(id).await?;

    if message.to_user.username != auth.username {
        return Err(AppError::Unauthorized);
    }

    let updated = state.message_repository.mark_read(id).await?;

    Ok(Json(MessageResponse { message: updated }))
}
