//! Application error types and their HTTP mappings
//!
//! Domain failures are modeled as one enum; handlers return
//! `Result<_, AppError>` and the `IntoResponse` impl translates each kind
//! to its status code and an `{"error": ...}` JSON body. Unexpected store
//! failures become a 500 with no internal detail leaked.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Application error kinds
#[derive(Error, Debug)]
pub enum AppError {
    /// Missing or malformed input, or invalid credentials
    #[error("{0}")]
    Validation(String),

    /// Missing/invalid token, or access to a resource the caller does not own
    #[error("Unauthorized")]
    Unauthorized,

    /// Unknown username or message id
    #[error("{0}")]
    NotFound(String),

    /// Duplicate username
    #[error("{0}")]
    Conflict(String),

    /// Underlying store failure
    #[error("Database error: {0}")]
    Database(#[source] sqlx::Error),

    /// Anything else that should never reach the client verbatim
    #[error("Internal server error")]
    Internal,
}

impl AppError {
    /// HTTP status code for this error kind
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Database(_) | AppError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => AppError::NotFound("Not found".to_string()),
            other => AppError::Database(other),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match &self {
            AppError::Database(e) => {
                error!("Database error: {}", e);
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}

/// Type alias for handler and repository results
pub type AppResult<T> = Result<T, AppError>;

/// True when the error is a Postgres unique-constraint violation (sqlstate 23505)
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .and_then(|db| db.code())
        .map(|code| code == "23505")
        .unwrap_or(false)
}

/// True when the error is a Postgres foreign-key violation (sqlstate 23503)
pub fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .and_then(|db| db.code())
        .map(|code| code == "23503")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes_per_error_kind() {
        assert_eq!(
            AppError::Validation("missing body".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AppError::NotFound("no such user".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Conflict("username taken".into()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(AppError::Internal.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        let err: AppError = sqlx::Error::RowNotFound.into();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_database_error_response_hides_details() {
        let err = AppError::Database(sqlx::Error::PoolClosed);
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "Internal server error");
    }
}
