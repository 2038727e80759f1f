//! Message model and the joined shapes returned by reads

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use crate::models::user::PublicUser;

/// Message row as stored
///
/// Sender and recipient are fixed at creation. `read_at` starts unset and
/// is written only by the recipient's mark-read action; once set it never
/// reverts to null.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Message {
    pub id: i32,
    pub from_username: String,
    pub to_username: String,
    pub body: String,
    pub sent_at: DateTime<Utc>,
    pub read_at: Option<DateTime<Utc>>,
}

/// A single message with both endpoints' public profiles
#[derive(Debug, Clone, Serialize)]
pub struct MessageDetail {
    pub id: i32,
    pub body: String,
    pub sent_at: DateTime<Utc>,
    pub read_at: Option<DateTime<Utc>>,
    pub from_user: PublicUser,
    pub to_user: PublicUser,
}

/// A sent message joined with the recipient's public profile
#[derive(Debug, Clone, Serialize)]
pub struct SentMessage {
    pub id: i32,
    pub body: String,
    pub sent_at: DateTime<Utc>,
    pub read_at: Option<DateTime<Utc>>,
    pub to_user: PublicUser,
}

/// A received message joined with the sender's public profile
#[derive(Debug, Clone, Serialize)]
pub struct ReceivedMessage {
    pub id: i32,
    pub body: String,
    pub sent_at: DateTime<Utc>,
    pub read_at: Option<DateTime<Utc>>,
    pub from_user: PublicUser,
}
