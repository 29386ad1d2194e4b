//! Argon2id password hashing. Hashes are stored as PHC strings, so the
//! parameters used at registration travel with the hash.

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use tracing::warn;

use crate::errors::domain::{DomainError, InfraErrorKind};

#[derive(Debug, Clone)]
pub struct PasswordHashing {
    params: Params,
}

impl PasswordHashing {
    /// Argon2's recommended defaults.
    pub fn standard() -> Self {
        Self {
            params: Params::default(),
        }
    }

    /// Minimum cost. Only for tests and throwaway local games.
    pub fn low_cost() -> Self {
        let params = Params::new(
            Params::MIN_M_COST,
            Params::MIN_T_COST,
            Params::MIN_P_COST,
            None,
        )
        .unwrap_or_default();
        Self { params }
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    pub fn hash(&self, password: &str) -> Result<String, DomainError> {
        let salt: [u8; 16] = rand::random();
        let salt = SaltString::encode_b64(&salt).map_err(|e| {
            DomainError::infra(InfraErrorKind::PasswordHash, format!("Salt encoding failed: {e}"))
        })?;
        self.argon2()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| {
                DomainError::infra(InfraErrorKind::PasswordHash, format!("Password hashing failed: {e}"))
            })
    }

    /// False for a wrong password and for a stored hash that does not parse.
    pub fn verify(&self, password: &str, stored: &str) -> bool {
        let parsed = match PasswordHash::new(stored) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!(error = %e, "Stored password hash is malformed");
                return false;
            }
        };
        self.argon2()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }
}

impl Default for PasswordHashing {
    fn default() -> Self {
        Self::standard()
    }
}
