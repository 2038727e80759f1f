//! User model and related payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Public fields of a user, safe to show to any logged-in caller
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PublicUser {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
}

/// Full profile including timestamps; never includes the password hash
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct UserProfile {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    /// Set once at registration
    pub join_at: DateTime<Utc>,
    /// Updated on every successful login or registration
    pub last_login_at: Option<DateTime<Utc>>,
}

/// New user registration payload
///
/// `password` is the raw password; it is hashed before storage and never
/// echoed back.
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
}
