use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{User, UserId};
use crate::state::security_config::SecurityConfig;
use crate::AppError;

/// Claims included in our backend-issued access tokens.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// User id as a UUID string
    pub sub: String,
    pub username: String,
    /// Issued-at (seconds since epoch)
    pub iat: i64,
    /// Expiry (seconds since epoch)
    pub exp: i64,
}

impl Claims {
    pub fn user_id(&self) -> Result<UserId, AppError> {
        Uuid::parse_str(&self.sub)
            .map(UserId::from)
            .map_err(|_| AppError::unauthorized_invalid_jwt())
    }
}

/// Mint a HS256 access token for `user`.
pub fn mint_access_token(
    user: &User,
    now: SystemTime,
    security: &SecurityConfig,
) -> Result<String, AppError> {
    let iat = now
        .duration_since(UNIX_EPOCH)
        .map_err(|_| AppError::internal("Failed to get current time"))?
        .as_secs() as i64;

    let claims = Claims {
        sub: user.id.to_string(),
        username: user.username.clone(),
        iat,
        exp: iat + security.access_token_ttl_secs,
    };

    encode(
        &Header::new(security.algorithm),
        &claims,
        &EncodingKey::from_secret(&security.jwt_secret),
    )
    .map_err(|e| AppError::internal(format!("Failed to encode JWT: {e}")))
}

/// Verify a token's signature and expiry and return its claims.
pub fn verify_access_token(token: &str, security: &SecurityConfig) -> Result<Claims, AppError> {
    let validation = Validation::new(security.algorithm);

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(&security.jwt_secret),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => AppError::unauthorized_expired_jwt(),
        _ => AppError::unauthorized_invalid_jwt(),
    })
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, SystemTime};

    use super::*;

    fn user() -> User {
        User {
            id: UserId::new(),
            username: "ada".into(),
            email: "ada@example.org".into(),
        }
    }

    #[test]
    fn mint_and_verify_roundtrip() {
        let security = SecurityConfig::new("test_secret_key_for_testing_purposes_only");
        let user = user();

        let token = mint_access_token(&user, SystemTime::now(), &security).unwrap();
        let claims = verify_access_token(&token, &security).unwrap();

        assert_eq!(claims.user_id().unwrap(), user.id);
        assert_eq!(claims.username, "ada");
        assert_eq!(claims.exp, claims.iat + security.access_token_ttl_secs);
    }

    #[test]
    fn expired_token_is_rejected() {
        let security =
            SecurityConfig::new("test_secret_key_for_testing_purposes_only").with_access_token_ttl(60);
        let issued = SystemTime::now() - Duration::from_secs(3600);

        let token = mint_access_token(&user(), issued, &security).unwrap();
        assert!(matches!(
            verify_access_token(&token, &security),
            Err(AppError::UnauthorizedExpiredJwt)
        ));
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = mint_access_token(
            &user(),
            SystemTime::now(),
            &SecurityConfig::new("first_secret_with_enough_length"),
        )
        .unwrap();
        assert!(matches!(
            verify_access_token(&token, &SecurityConfig::new("second_secret_with_enough_length")),
            Err(AppError::UnauthorizedInvalidJwt)
        ));
    }
}
