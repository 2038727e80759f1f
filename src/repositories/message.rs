//! Message repository for creating, reading, and marking messages

use sqlx::{PgPool, Row};
use tracing::info;

use crate::error::{self, AppError, AppResult};
use crate::models::{Message, MessageDetail, PublicUser};
use crate::validation::require;

/// Message repository
#[derive(Clone)]
pub struct MessageRepository {
    pool: PgPool,
}

impl MessageRepository {
    /// Create a new message repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Persist a new message
    ///
    /// The body must be non-empty and both usernames must exist; the
    /// store's foreign keys reject unknown endpoints. `sent_at` is the
    /// current time and `read_at` starts unset.
    pub async fn create(
        &self,
        from_username: &str,
        to_username: &str,
        body: &str,
    ) -> AppResult<Message> {
        require("to_username", to_username)?;
        require("body", body)?;

        info!("Creating message from {} to {}", from_username, to_username);

        let row = sqlx::query(
            r#"
            INSERT INTO messages (from_username, to_username, body, sent_at)
            VALUES ($1, $2, $3, now())
            RETURNING id, from_username, to_username, body, sent_at, read_at
            "#,
        )
        .bind(from_username)
        .bind(to_username)
        .bind(body)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if error::is_foreign_key_violation(&e) {
                AppError::Validation("Unknown sender or recipient".to_string())
            } else {
                e.into()
            }
        })?;

        Ok(Message {
            id: row.get("id"),
            from_username: row.get("from_username"),
            to_username: row.get("to_username"),
            body: row.get("body"),
            sent_at: row.get("sent_at"),
            read_at: row.get("read_at"),
        })
    }

    /// Fetch one message with both endpoints' public profiles
    pub async fn get(&self, id: i32) -> AppResult<MessageDetail> {
        let row = sqlx::query(
            r#"
            SELECT m.id, m.body, m.sent_at, m.read_at,
                   f.username   AS from_username,
                   f.first_name AS from_first_name,
                   f.last_name  AS from_last_name,
                   f.phone      AS from_phone,
                   t.username   AS to_username,
                   t.first_name AS to_first_name,
                   t.last_name  AS to_last_name,
                   t.phone      AS to_phone
            FROM messages AS m
            JOIN users AS f ON m.from_username = f.username
            JOIN users AS t ON m.to_username = t.username
            WHERE m.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let row = row.ok_or_else(|| AppError::NotFound(format!("No such message: {}", id)))?;

        Ok(MessageDetail {
            id: row.get("id"),
            body: row.get("body"),
            sent_at: row.get("sent_at"),
            read_at: row.get("read_at"),
            from_user: PublicUser {
                username: row.get("from_username"),
                first_name: row.get("from_first_name"),
                last_name: row.get("from_last_name"),
                phone: row.get("from_phone"),
            },
            to_user: PublicUser {
                username: row.get("to_username"),
                first_name: row.get("to_first_name"),
                last_name: row.get("to_last_name"),
                phone: row.get("to_phone"),
            },
        })
    }

    /// Set read_at to the current time
    ///
    /// Unconditional: re-marking an already-read message overwrites the
    /// timestamp rather than erroring.
    pub async fn mark_read(&self, id: i32) -> AppResult<Message> {
        let row = sqlx::query(
            r#"
            UPDATE messages
            SET read_at = now()
            WHERE id = $1
            RETURNING id, from_username, to_username, body, sent_at, read_at
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let row = row.ok_or_else(|| AppError::NotFound(format!("No such message: {}", id)))?;

        Ok(Message {
            id: row.get("id"),
            from_username: row.get("from_username"),
            to_username: row.get("to_username"),
            body: row.get("body"),
            sent_at: row.get("sent_at"),
            read_at: row.get("read_at"),
        })
    }
}
