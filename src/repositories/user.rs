//! User repository for registration, authentication, and directory reads

use sqlx::{PgPool, Row};
use tracing::info;

use crate::error::{self, AppError, AppResult};
use crate::models::{NewUser, PublicUser, ReceivedMessage, SentMessage, UserProfile};
use crate::password::PasswordService;
use crate::validation::require;

/// User repository
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
    passwords: PasswordService,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(pool: PgPool, passwords: PasswordService) -> Self {
        Self { pool, passwords }
    }

    /// Register a new user
    ///
    /// Every field must be present. The password is hashed before storage;
    /// the returned profile never includes the hash. A duplicate username
    /// is rejected by the store's primary key and surfaces as a conflict.
    pub async fn register(&self, new_user: &NewUser) -> AppResult<PublicUser> {
        require("username", &new_user.username)?;
        require("password", &new_user.password)?;
        require("first_name", &new_user.first_name)?;
        require("last_name", &new_user.last_name)?;
        require("phone", &new_user.phone)?;

        info!("Registering new user: {}", new_user.username);

        let password_hash = self.passwords.hash(new_user.password.clone()).await?;

        let row = sqlx::query(
            r#"
            INSERT INTO users (username, password, first_name, last_name, phone, join_at, last_login_at)
            VALUES ($1, $2, $3, $4, $5, now(), now())
            RETURNING username, first_name, last_name, phone
            "#,
        )
        .bind(&new_user.username)
        .bind(&password_hash)
        .bind(&new_user.first_name)
        .bind(&new_user.last_name)
        .bind(&new_user.phone)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if error::is_unique_violation(&e) {
                AppError::Conflict(format!("Username taken: {}", new_user.username))
            } else {
                e.into()
            }
        })?;

        Ok(PublicUser {
            username: row.get("username"),
            first_name: row.get("first_name"),
            last_name: row.get("last_name"),
            phone: row.get("phone"),
        })
    }

    /// Check a username/password pair
    ///
    /// An unknown username reports plain false, the same as a wrong
    /// password, so the result cannot be used to probe for accounts.
    pub async fn authenticate(&self, username: &str, password: &str) -> AppResult<bool> {
        let row = sqlx::query("SELECT password FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => {
                let stored_hash: String = row.get("password");
                self.passwords.verify(password.to_string(), stored_hash).await
            }
            None => Ok(false),
        }
    }

    /// Set last_login_at to the current time
    pub async fn update_login_timestamp(&self, username: &str) -> AppResult<()> {
        let row = sqlx::query(
            r#"
            UPDATE users
            SET last_login_at = now()
            WHERE username = $1
            RETURNING username
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        if row.is_none() {
            return Err(AppError::NotFound(format!("No such user: {}", username)));
        }

        Ok(())
    }

    /// Public fields of all users, ordered by last name then first name
    pub async fn all(&self) -> AppResult<Vec<PublicUser>> {
        let users = sqlx::query_as::<_, PublicUser>(
            r#"
            SELECT username, first_name, last_name, phone
            FROM users
            ORDER BY last_name, first_name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    /// Full profile for one user
    pub async fn get(&self, username: &str) -> AppResult<UserProfile> {
        let user = sqlx::query_as::<_, UserProfile>(
            r#"
            SELECT username, first_name, last_name, phone, join_at, last_login_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        user.ok_or_else(|| AppError::NotFound(format!("No such user: {}", username)))
    }

    /// Messages sent by this user, joined with each recipient's public
    /// profile, ordered ascending by message id
    pub async fn messages_from(&self, username: &str) -> AppResult<Vec<SentMessage>> {
        let rows = sqlx::query(
            r#"
            SELECT m.id, m.body, m.sent_at, m.read_at,
                   u.username, u.first_name, u.last_name, u.phone
            FROM messages AS m
            JOIN users AS u ON m.to_username = u.username
            WHERE m.from_username = $1
            ORDER BY m.id
            "#,
        )
        .bind(username)
        .fetch_all(&self.pool)
        .await?;

        let messages = rows
            .into_iter()
            .map(|row| SentMessage {
                id: row.get("id"),
                body: row.get("body"),
                sent_at: row.get("sent_at"),
                read_at: row.get("read_at"),
                to_user: PublicUser {
                    username: row.get("username"),
                    first_name: row.get("first_name"),
                    last_name: row.get("last_name"),
                    phone: row.get("phone"),
                },
            })
            .collect();

        Ok(messages)
    }

    /// Messages received by this user, joined with each sender's public
    /// profile, newest first
    pub async fn messages_to(&self, username: &str) -> AppResult<Vec<ReceivedMessage>> {
        let rows = sqlx::query(
            r#"
            SELECT m.id, m.body, m.sent_at, m.read_at,
                   u.username, u.first_name, u.last_name, u.phone
            FROM messages AS m
            JOIN users AS u ON m.from_username = u.username
            WHERE m.to_username = $1
            ORDER BY m.sent_at DESC
            "#,
        )
        .bind(username)
        .fetch_all(&self.pool)
        .await?;

        let messages = rows
            .into_iter()
            .map(|row| ReceivedMessage {
                id: row.get("id"),
                body: row.get("body"),
                sent_at: row.get("sent_at"),
                read_at: row.get("read_at"),
                from_user: PublicUser {
                    username: row.get("username"),
                    first_name: row.get("first_name"),
                    last_name: row.get("last_name"),
                    phone: row.get("phone"),
                },
            })
            .collect();

        Ok(messages)
    }
}
