//! Request authentication middleware
//!
//! Token-gated routes run behind `auth_middleware`, which verifies the
//! bearer token and attaches the verified username to the request for
//! downstream handlers. Self-only routes additionally call
//! `ensure_correct_user`.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};

use crate::{error::AppError, AppState};

/// Identity attached to a request after token verification
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub username: String,
}

/// Extract and verify the bearer token from the Authorization header
///
/// On success the verified username is inserted into the request
/// extensions as an [`AuthUser`]. A missing or invalid token is a 401.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = req
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .ok_or(AppError::Unauthorized)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(AppError::Unauthorized)?;

    let username = state.token_service.verify(token)?;

    req.extensions_mut().insert(AuthUser { username });

    Ok(next.run(req).await)
}

/// Reject the request unless the caller is the named user
pub fn ensure_correct_user(user: &AuthUser, username: &str) -> Result<(), AppError> {
    if user.username != username {
        return Err(AppError::Unauthorized);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_correct_user_accepts_self() {
        let user = AuthUser {
            username: "alice".to_string(),
        };
        assert!(ensure_correct_user(&user, "alice").is_ok());
    }

    #[test]
    fn test_ensure_correct_user_rejects_others() {
        let user = AuthUser {
            username: "alice".to_string(),
        };
        let err = ensure_correct_user(&user, "bob").unwrap_err();
        assert!(matches!(err, AppError::Unauthorized));
    }
}
