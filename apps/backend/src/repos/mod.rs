//! Storage interface consumed by the services.
//!
//! A `Game` is loaded and saved as one aggregate (teams, rounds, turns).
//! `save_game` is the only write path for a started game and enforces the
//! optimistic lock: it fails with `Conflict(OptimisticLock)` when the stored
//! version differs from `expected_version`, leaving no partial state.

use async_trait::async_trait;

use crate::domain::{Game, GameId, GameStatus, TeamId, TurnId, User, UserId, Word};
use crate::errors::domain::DomainError;

/// A user with the argon2 PHC string of their password. Never serialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub user: User,
    pub password_hash: String,
}

#[async_trait]
pub trait GameStore: Send + Sync {
    /// Fails with `Validation(UsernameTaken)` or `Validation(EmailTaken)`
    /// when either is already registered.
    async fn create_user(&self, account: Account) -> Result<User, DomainError>;

    async fn find_user(&self, id: UserId) -> Result<Option<User>, DomainError>;

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Account with credentials, for login.
    async fn find_account(&self, username: &str) -> Result<Option<Account>, DomainError>;

    /// Persist a brand-new game with version 0.
    async fn insert_game(&self, game: Game) -> Result<Game, DomainError>;

    async fn find_game(&self, id: GameId) -> Result<Option<Game>, DomainError>;

    async fn find_game_id_by_team(&self, team: TeamId) -> Result<Option<GameId>, DomainError>;

    async fn find_game_id_by_turn(&self, turn: TurnId) -> Result<Option<GameId>, DomainError>;

    async fn find_games_by_status(&self, status: GameStatus) -> Result<Vec<Game>, DomainError>;

    /// Atomically replace the stored aggregate; returns it with the bumped version.
    async fn save_game(&self, game: Game, expected_version: i32) -> Result<Game, DomainError>;

    /// Full word catalog.
    async fn word_catalog(&self) -> Result<Vec<Word>, DomainError>;
}
