//! messagely: a token-authenticated messaging backend
//!
//! Users register and log in with credentials, receive signed identity
//! tokens, and exchange short text messages with other registered users,
//! with read-state tracking. Access control is enforced per message: only
//! the sender or recipient may view one, and only the recipient may mark
//! it read.

pub mod database;
pub mod error;
pub mod jwt;
pub mod middleware;
pub mod models;
pub mod password;
pub mod repositories;
pub mod routes;
pub mod validation;

use sqlx::PgPool;

use crate::jwt::TokenService;
use crate::repositories::{MessageRepository, UserRepository};

/// Application state shared across handlers
///
/// Everything here is cheap to clone and read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub token_service: TokenService,
    pub user_repository: UserRepository,
    pub message_repository: MessageRepository,
}
