//! User directory endpoints
//!
//! All of these require a valid token; the profile and message listings
//! are additionally self-only.

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Extension, Json,
};
use serde::Serialize;

use crate::{
    error::AppError,
    middleware::{ensure_correct_user, AuthUser},
    models::{PublicUser, ReceivedMessage, SentMessage, UserProfile},
    AppState,
};

/// Response for the user listing
#[derive(Serialize)]
pub struct UserListResponse {
    pub users: Vec<PublicUser>,
}

/// Response for a single profile
#[derive(Serialize)]
pub struct UserResponse {
    pub user: UserProfile,
}

/// Response for a user's received messages
#[derive(Serialize)]
pub struct ReceivedMessagesResponse {
    pub messages: Vec<ReceivedMessage>,
}

/// Response for a user's sent messages
#[derive(Serialize)]
pub struct SentMessagesResponse {
    pub messages: Vec<SentMessage>,
}

/// List all users' public fields
pub async fn list_users(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let users = state.user_repository.all().await?;

    Ok(Json(UserListResponse { users }))
}

/// Get one user's full profile (self-only)
pub async fn get_user(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(username): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    ensure_correct_user(&auth, &username)?;

    let user = state.user_repository.get(&username).await?;

    Ok(Json(UserResponse { user }))
}

/// Messages received by this user, newest first (self-only)
pub async fn messages_to_user(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(username): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    ensure_correct_user(&auth, &username)?;

    let messages = state.user_repository.messages_to(&username).await?;

    Ok(Json(ReceivedMessagesResponse { messages }))
}

/// Messages sent by this user, in sending order (self-only)
pub async fn messages_from_user(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(username): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    ensure_correct_user(&auth, &username)?;

    let messages = state.user_repository.messages_from(&username).await?;

    Ok(Json(SentMessagesResponse { messages }))
}
