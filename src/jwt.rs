//! Token issuance and verification
//!
//! Identity tokens are stateless JWTs signed with a single process-wide
//! secret (HS256). The only claim is the username; there is no expiry and
//! no revocation list, so a token stays valid until the secret rotates.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::error::AppError;

/// Token signing configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Shared secret for signing and verifying tokens
    pub secret_key: String,
}

impl JwtConfig {
    /// Create a new JwtConfig from environment variables
    ///
    /// # Environment Variables
    /// - `SECRET_KEY`: shared signing secret (required)
    pub fn from_env() -> anyhow::Result<Self> {
        let secret_key = std::env::var("SECRET_KEY")
            .map_err(|_| anyhow::anyhow!("SECRET_KEY environment variable not set"))?;

        Ok(JwtConfig { secret_key })
    }
}

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Username the token was issued for
    pub username: String,
}

/// Issues and verifies identity tokens
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    /// Initialize a new token service from the shared secret
    pub fn new(config: &JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret_key.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret_key.as_bytes());

        let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
        // Tokens carry the username claim and nothing else; there is no
        // exp claim to check.
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        TokenService {
            encoding_key,
            decoding_key,
            validation,
        }
    }

    /// Issue a signed token embedding the username as its sole claim
    pub fn issue(&self, username: &str) -> Result<String, AppError> {
        let claims = Claims {
            username: username.to_string(),
        };

        encode(
            &Header::new(jsonwebtoken::Algorithm::HS256),
            &claims,
            &self.encoding_key,
        )
        .map_err(|e| {
            error!("Failed to sign token: {}", e);
            AppError::Internal
        })
    }

    /// Verify a token's signature and return the embedded username
    ///
    /// The claim is not checked against the user directory; callers must
    /// not assume the returned username still names a live user.
    pub fn verify(&self, token: &str) -> Result<String, AppError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|_| AppError::Unauthorized)?;

        Ok(token_data.claims.username)
    }
}
