use std::env;

use crate::error::AppError;

/// Where the aggregate store lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreConfig {
    /// In-process store seeded with the built-in word catalog.
    Memory,
    /// Postgres or SQLite reached through sea-orm.
    Database { url: String },
}

impl StoreConfig {
    /// `DATABASE_URL` selects a database; absent means the in-memory store.
    pub fn from_env() -> Result<Self, AppError> {
        match env::var("DATABASE_URL") {
            Ok(url) if url.trim().is_empty() => Err(AppError::config(
                "Environment variable 'DATABASE_URL' is set but empty",
            )),
            Ok(url) => Ok(Self::Database { url }),
            Err(_) => Ok(Self::Memory),
        }
    }
}

/// Optional Redis endpoint for publishing lifecycle events.
pub fn redis_url() -> Option<String> {
    env::var("REDIS_URL").ok().filter(|url| !url.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use std::env;

    use serial_test::serial;

    use super::*;

    #[test]
    #[serial]
    fn database_url_selects_store() {
        env::remove_var("DATABASE_URL");
        assert_eq!(StoreConfig::from_env().unwrap(), StoreConfig::Memory);

        env::set_var("DATABASE_URL", "sqlite::memory:");
        assert_eq!(
            StoreConfig::from_env().unwrap(),
            StoreConfig::Database {
                url: "sqlite::memory:".into()
            }
        );

        env::set_var("DATABASE_URL", "  ");
        assert!(StoreConfig::from_env().is_err());
        env::remove_var("DATABASE_URL");
    }

    #[test]
    #[serial]
    fn blank_redis_url_is_ignored() {
        env::set_var("REDIS_URL", "");
        assert_eq!(redis_url(), None);
        env::set_var("REDIS_URL", "redis://localhost:6379");
        assert_eq!(redis_url().as_deref(), Some("redis://localhost:6379"));
        env::remove_var("REDIS_URL");
    }
}
