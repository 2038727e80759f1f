//! HTTP routing

pub mod auth;
pub mod messages;
pub mod users;

use axum::{
    middleware,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;

use crate::{middleware::auth_middleware, AppState};

/// Create the application router
///
/// Login, registration, and the health check are public; everything else
/// requires a valid bearer token.
pub fn create_router(state: AppState) -> Router {
    let protected_routes = Router::new()
        .route("/users", get(users::list_users))
        .route("/users/:username", get(users::get_user))
        .route("/users/:username/to", get(users::messages_to_user))
        .route("/users/:username/from", get(users::messages_from_user))
        .route("/messages", post(messages::send_message))
        .route("/messages/:id", get(messages::get_message))
        .route("/messages/:id/read", post(messages::mark_message_read))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/health", get(health_check))
        .route("/auth/login", post(auth::login))
        .route("/auth/register", post(auth::register))
        .merge(protected_routes)
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "messagely"
    }))
}
