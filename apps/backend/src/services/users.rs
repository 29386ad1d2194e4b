use tracing::{debug, info};

use crate::auth::password::PasswordHashing;
use crate::domain::{User, UserId};
use crate::errors::domain::{DomainError, ValidationKind};
use crate::repos::{Account, GameStore};

pub const MAX_USERNAME_LEN: usize = 64;
pub const MAX_EMAIL_LEN: usize = 254;
pub const MIN_PASSWORD_LEN: usize = 8;
pub const MAX_PASSWORD_LEN: usize = 128;

/// Input for [`register_user`].
#[derive(Debug, Clone, Copy)]
pub struct Registration<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

fn validate_username(raw: &str) -> Result<&str, DomainError> {
    let username = raw.trim();
    let len = username.chars().count();
    if len == 0 || len > MAX_USERNAME_LEN {
        return Err(DomainError::validation(
            ValidationKind::InvalidUsername,
            format!("Username must be 1..={MAX_USERNAME_LEN} characters"),
        ));
    }
    if !username
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
    {
        return Err(DomainError::validation(
            ValidationKind::InvalidUsername,
            "Username may only contain letters, digits, '_', '-' and '.'",
        ));
    }
    Ok(username)
}

/// Trimmed and lowercased; one `@` with a dotted domain.
fn normalize_email(raw: &str) -> Result<String, DomainError> {
    let email = raw.trim().to_lowercase();
    let invalid = || DomainError::validation(ValidationKind::InvalidEmail, "Email address is not valid");

    if email.is_empty() || email.len() > MAX_EMAIL_LEN || email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }
    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty()
        || domain.contains('@')
        || !domain.contains('.')
        || domain.starts_with('.')
        || domain.ends_with('.')
    {
        return Err(invalid());
    }
    Ok(email)
}

fn validate_password(password: &str) -> Result<(), DomainError> {
    let len = password.chars().count();
    if !(MIN_PASSWORD_LEN..=MAX_PASSWORD_LEN).contains(&len) {
        return Err(DomainError::validation(
            ValidationKind::InvalidPassword,
            format!("Password must be {MIN_PASSWORD_LEN}..={MAX_PASSWORD_LEN} characters"),
        ));
    }
    Ok(())
}

/// Create a user; usernames and email addresses are unique.
pub async fn register_user(
    store: &dyn GameStore,
    passwords: &PasswordHashing,
    registration: Registration<'_>,
) -> Result<User, DomainError> {
    let username = validate_username(registration.username)?;
    let email = normalize_email(registration.email)?;
    validate_password(registration.password)?;
    debug!(username, "Registering user");

    if store.find_user_by_username(username).await?.is_some() {
        return Err(DomainError::validation(
            ValidationKind::UsernameTaken,
            format!("Username {username:?} is already taken"),
        ));
    }
    if store.find_user_by_email(&email).await?.is_some() {
        return Err(DomainError::validation(
            ValidationKind::EmailTaken,
            "Email address is already registered",
        ));
    }

    let password_hash = passwords.hash(registration.password)?;
    let user = store
        .create_user(Account {
            user: User {
                id: UserId::new(),
                username: username.to_string(),
                email,
            },
            password_hash,
        })
        .await?;
    info!(user_id = %user.id, "User registered");
    Ok(user)
}

/// Check a username/password pair. `None` when either is wrong; callers
/// must not reveal which.
pub async fn authenticate(
    store: &dyn GameStore,
    passwords: &PasswordHashing,
    username: &str,
    password: &str,
) -> Result<Option<User>, DomainError> {
    let Some(account) = store.find_account(username.trim()).await? else {
        debug!("Login for unknown username");
        return Ok(None);
    };
    if !passwords.verify(password, &account.password_hash) {
        debug!(user_id = %account.user.id, "Login with wrong password");
        return Ok(None);
    }
    info!(user_id = %account.user.id, "User logged in");
    Ok(Some(account.user))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemoryStore;

    fn registration<'a>(username: &'a str, email: &'a str) -> Registration<'a> {
        Registration {
            username,
            email,
            password: "open-sesame",
        }
    }

    #[test]
    fn username_rules() {
        assert_eq!(validate_username("  ada_l ").unwrap(), "ada_l");
        assert!(validate_username("").is_err());
        assert!(validate_username("has space").is_err());
        assert!(validate_username(&"x".repeat(MAX_USERNAME_LEN + 1)).is_err());
    }

    #[test]
    fn email_rules() {
        assert_eq!(normalize_email(" Ada@Example.ORG ").unwrap(), "ada@example.org");
        for bad in ["", "ada", "@example.org", "ada@org", "ada@.org", "ada@org.", "a b@x.org", "a@b@c.org"] {
            assert!(normalize_email(bad).is_err(), "{bad:?}");
        }
    }

    #[test]
    fn password_rules() {
        assert!(validate_password("short").is_err());
        assert!(validate_password(&"p".repeat(MAX_PASSWORD_LEN + 1)).is_err());
        assert!(validate_password("long enough").is_ok());
    }

    #[tokio::test]
    async fn duplicate_username_or_email_is_rejected() {
        let store = MemoryStore::new(Vec::new());
        let hashing = PasswordHashing::low_cost();
        let user = register_user(&store, &hashing, registration("grace", "grace@navy.mil"))
            .await
            .unwrap();
        assert_eq!(user.username, "grace");

        let err = register_user(&store, &hashing, registration(" grace ", "other@navy.mil"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::Validation(ValidationKind::UsernameTaken, _)
        ));

        let err = register_user(&store, &hashing, registration("hopper", "GRACE@navy.mil"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(ValidationKind::EmailTaken, _)));
    }

    #[tokio::test]
    async fn authenticate_checks_the_password() {
        let store = MemoryStore::new(Vec::new());
        let hashing = PasswordHashing::low_cost();
        let user = register_user(&store, &hashing, registration("ada", "ada@example.org"))
            .await
            .unwrap();

        let found = authenticate(&store, &hashing, "ada", "open-sesame").await.unwrap();
        assert_eq!(found, Some(user));
        assert_eq!(authenticate(&store, &hashing, "ada", "wrong-pass").await.unwrap(), None);
        assert_eq!(authenticate(&store, &hashing, "nobody", "open-sesame").await.unwrap(), None);
    }
}
