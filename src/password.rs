//! Password hashing and verification
//!
//! Uses salted argon2id with a configurable cost. Hashing is CPU-bound, so
//! both hashing and verification run on the blocking pool rather than the
//! async scheduler.

use argon2::{
    password_hash::SaltString, Algorithm, Argon2, Params, PasswordHash, PasswordHasher,
    PasswordVerifier, Version,
};
use tracing::error;

use crate::error::AppError;

/// Hashing cost configuration
#[derive(Debug, Clone)]
pub struct HashingConfig {
    /// Memory cost in KiB
    pub memory_kib: u32,
    /// Number of passes over the memory
    pub iterations: u32,
    /// Degree of parallelism
    pub parallelism: u32,
}

impl Default for HashingConfig {
    fn default() -> Self {
        HashingConfig {
            memory_kib: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
            parallelism: Params::DEFAULT_P_COST,
        }
    }
}

impl HashingConfig {
    /// Create a new HashingConfig from environment variables
    ///
    /// # Environment Variables
    /// - `ARGON2_MEMORY_KIB`: memory cost in KiB (default: argon2 crate default)
    /// - `ARGON2_ITERATIONS`: number of passes (default: argon2 crate default)
    /// - `ARGON2_PARALLELISM`: lanes (default: argon2 crate default)
    pub fn from_env() -> Self {
        let defaults = HashingConfig::default();

        let read = |name: &str, fallback: u32| {
            std::env::var(name)
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(fallback)
        };

        HashingConfig {
            memory_kib: read("ARGON2_MEMORY_KIB", defaults.memory_kib),
            iterations: read("ARGON2_ITERATIONS", defaults.iterations),
            parallelism: read("ARGON2_PARALLELISM", defaults.parallelism),
        }
    }
}

/// Hashes and verifies passwords
#[derive(Clone)]
pub struct PasswordService {
    params: Params,
}

impl PasswordService {
    /// Initialize a new password service with the given cost settings
    pub fn new(config: &HashingConfig) -> anyhow::Result<Self> {
        let params = Params::new(config.memory_kib, config.iterations, config.parallelism, None)
            .map_err(|e| anyhow::anyhow!("Invalid argon2 parameters: {}", e))?;

        Ok(PasswordService { params })
    }

    /// Hash a password with a fresh random salt
    pub async fn hash(&self, password: String) -> Result<String, AppError> {
        let params = self.params.clone();

        tokio::task::spawn_blocking(move || {
            let salt = SaltString::generate(&mut rand::thread_rng());
            let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
            argon2
                .hash_password(password.as_bytes(), &salt)
                .map(|hash| hash.to_string())
        })
        .await
        .map_err(|e| {
            error!("Hashing task failed: {}", e);
            AppError::Internal
        })?
        .map_err(|e| {
            error!("Failed to hash password: {}", e);
            AppError::Internal
        })
    }

    /// Check a candidate password against a stored hash
    ///
    /// Returns false for a wrong password or an unparseable stored hash.
    /// The cost parameters are read back from the hash string itself, so
    /// hashes produced under older settings still verify.
    pub async fn verify(&self, password: String, stored_hash: String) -> Result<bool, AppError> {
        tokio::task::spawn_blocking(move || {
            let Ok(parsed_hash) = PasswordHash::new(&stored_hash) else {
                return false;
            };

            Argon2::default()
                .verify_password(password.as_bytes(), &parsed_hash)
                .is_ok()
        })
        .await
        .map_err(|e| {
            error!("Verification task failed: {}", e);
            AppError::Internal
        })
    }
}
