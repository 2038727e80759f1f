//! Login and registration endpoints

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{error::AppError, models::NewUser, validation::required, AppState};

/// Request for user login
///
/// Fields are optional at the deserialization layer so that an absent key
/// and an empty value take the same validation path.
#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Request for user registration
#[derive(Deserialize)]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
}

/// Response carrying an issued identity token
#[derive(Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// User login endpoint
///
/// Verifies the credentials, refreshes last_login_at, and issues a token.
/// An unknown username and a wrong password produce the same 400 response.
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let username = required("username", payload.username.as_deref())?;
    let password = required("password", payload.password.as_deref())?;

    info!("Login attempt for user: {}", username);

    let valid = state.user_repository.authenticate(username, password).await?;

    if !valid {
        return Err(AppError::Validation("Invalid username/password".to_string()));
    }

    state.user_repository.update_login_timestamp(username).await?;

    let token = state.token_service.issue(username)?;

    Ok((StatusCode::OK, Json(TokenResponse { token })))
}

/// User registration endpoint
///
/// Creates the user, records the first login, and issues a token.
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    let new_user = NewUser {
        username: required("username", payload.username.as_deref())?.to_string(),
        password: required("password", payload.password.as_deref())?.to_string(),
        first_name: required("first_name", payload.first_name.as_deref())?.to_string(),
        last_name: required("last_name", payload.last_name.as_deref())?.to_string(),
        phone: required("phone", payload.phone.as_deref())?.to_string(),
    };

    let user = state.user_repository.register(&new_user).await?;

    state
        .user_repository
        .update_login_timestamp(&user.username)
        .await?;

    let token = state.token_service.issue(&user.username)?;

    Ok((StatusCode::CREATED, Json(TokenResponse { token })))
}
