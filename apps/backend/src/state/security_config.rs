use jsonwebtoken::Algorithm;

use crate::auth::password::PasswordHashing;
use crate::error::AppError;

/// Access tokens live for a day unless overridden; clients log in again after expiry.
pub const DEFAULT_ACCESS_TOKEN_TTL_SECS: i64 = 24 * 60 * 60;

/// Signing key and lifetime for backend-issued access tokens, plus the
/// password hashing cost for new registrations.
#[derive(Debug, Clone)]
pub struct SecurityConfig {
    pub jwt_secret: Vec<u8>,
    pub algorithm: Algorithm,
    pub access_token_ttl_secs: i64,
    pub passwords: PasswordHashing,
}

impl SecurityConfig {
    pub fn new(jwt_secret: impl Into<Vec<u8>>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            algorithm: Algorithm::HS256,
            access_token_ttl_secs: DEFAULT_ACCESS_TOKEN_TTL_SECS,
            passwords: PasswordHashing::standard(),
        }
    }

    pub fn with_password_hashing(mut self, passwords: PasswordHashing) -> Self {
        self.passwords = passwords;
        self
    }

    pub fn with_access_token_ttl(mut self, secs: i64) -> Self {
        self.access_token_ttl_secs = secs;
        self
    }

    /// `BACKEND_JWT_SECRET` (required) and `BACKEND_TOKEN_TTL_SECS` (optional).
    pub fn from_env() -> Result<Self, AppError> {
        let secret = std::env::var("BACKEND_JWT_SECRET")
            .map_err(|_| AppError::config("BACKEND_JWT_SECRET must be set"))?;
        let config = Self::new(secret.into_bytes());

        match std::env::var("BACKEND_TOKEN_TTL_SECS") {
            Ok(raw) => {
                let secs: i64 = raw.parse().map_err(|_| {
                    AppError::config(format!("BACKEND_TOKEN_TTL_SECS must be an integer, got {raw:?}"))
                })?;
                if secs <= 0 {
                    return Err(AppError::config("BACKEND_TOKEN_TTL_SECS must be positive"));
                }
                Ok(config.with_access_token_ttl(secs))
            }
            Err(_) => Ok(config),
        }
    }
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self::new(b"insecure_secret_for_local_games_only".to_vec())
            .with_password_hashing(PasswordHashing::low_cost())
    }
}
