//! In-process `GameStore` used when no database is configured, and in tests.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;
use time::OffsetDateTime;

use crate::domain::{Game, GameId, GameStatus, TeamId, TurnId, User, UserId, Word, WordId};
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind, ValidationKind};
use crate::repos::{Account, GameStore};

#[derive(Default)]
struct Inner {
    users: HashMap<UserId, Account>,
    games: HashMap<GameId, Game>,
    team_index: HashMap<TeamId, GameId>,
    turn_index: HashMap<TurnId, GameId>,
}

impl Inner {
    fn index(&mut self, game: &Game) {
        for team in &game.teams {
            self.team_index.insert(team.id, game.id);
        }
        for turn in game.rounds.iter().flat_map(|r| &r.turns) {
            self.turn_index.insert(turn.id, game.id);
        }
    }
}

/// Saves are serialized by a single mutex; the version check runs under it.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
    words: Vec<Word>,
}

impl MemoryStore {
    pub fn new(words: Vec<Word>) -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
            words,
        }
    }

    /// Store preloaded with the same English catalog the migrations seed.
    pub fn with_default_catalog() -> Self {
        let words = migration::DEFAULT_WORDS
            .iter()
            .enumerate()
            .map(|(index, text)| Word {
                id: WordId::from(migration::seeded_word_id(index)),
                text: (*text).to_string(),
                lang: migration::DEFAULT_LANG.to_string(),
            })
            .collect();
        Self::new(words)
    }
}

#[async_trait]
impl GameStore for MemoryStore {
    async fn create_user(&self, account: Account) -> Result<User, DomainError> {
        let mut inner = self.inner.lock();
        let user = &account.user;
        if inner.users.values().any(|a| a.user.username == user.username) {
            return Err(DomainError::validation(
                ValidationKind::UsernameTaken,
                format!("Username {:?} is already taken", user.username),
            ));
        }
        if inner.users.values().any(|a| a.user.email == user.email) {
            return Err(DomainError::validation(
                ValidationKind::EmailTaken,
                "Email address is already registered",
            ));
        }
        let user = user.clone();
        inner.users.insert(user.id, account);
        Ok(user)
    }

    async fn find_user(&self, id: UserId) -> Result<Option<User>, DomainError> {
        Ok(self.inner.lock().users.get(&id).map(|a| a.user.clone()))
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        Ok(self.find_account(username).await?.map(|a| a.user))
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        Ok(self
            .inner
            .lock()
            .users
            .values()
            .find(|a| a.user.email == email)
            .map(|a| a.user.clone()))
    }

    async fn find_account(&self, username: &str) -> Result<Option<Account>, DomainError> {
        Ok(self
            .inner
            .lock()
            .users
            .values()
            .find(|a| a.user.username == username)
            .cloned())
    }

    async fn insert_game(&self, mut game: Game) -> Result<Game, DomainError> {
        let mut inner = self.inner.lock();
        if inner.games.contains_key(&game.id) {
            return Err(DomainError::conflict(
                ConflictKind::Other("DuplicateGame".into()),
                format!("Game {} already exists", game.id),
            ));
        }
        game.version = 0;
        inner.index(&game);
        inner.games.insert(game.id, game.clone());
        Ok(game)
    }

    async fn find_game(&self, id: GameId) -> Result<Option<Game>, DomainError> {
        Ok(self.inner.lock().games.get(&id).cloned())
    }

    async fn find_game_id_by_team(&self, team: TeamId) -> Result<Option<GameId>, DomainError> {
        Ok(self.inner.lock().team_index.get(&team).copied())
    }

    async fn find_game_id_by_turn(&self, turn: TurnId) -> Result<Option<GameId>, DomainError> {
        Ok(self.inner.lock().turn_index.get(&turn).copied())
    }

    async fn find_games_by_status(&self, status: GameStatus) -> Result<Vec<Game>, DomainError> {
        let inner = self.inner.lock();
        let mut games: Vec<Game> = inner
            .games
            .values()
            .filter(|g| g.status == status)
            .cloned()
            .collect();
        games.sort_by_key(|g| g.created_at);
        Ok(games)
    }

    async fn save_game(&self, mut game: Game, expected_version: i32) -> Result<Game, DomainError> {
        let mut inner = self.inner.lock();
        let stored = inner.games.get(&game.id).ok_or_else(|| {
            DomainError::not_found(NotFoundKind::Game, format!("Game {} not found", game.id))
        })?;
        if stored.version != expected_version {
            return Err(DomainError::conflict(
                ConflictKind::OptimisticLock,
                format!(
                    "Game was modified concurrently (expected version {expected_version}, actual version {})",
                    stored.version
                ),
            ));
        }

        game.version = expected_version + 1;
        game.updated_at = OffsetDateTime::now_utc();
        inner.index(&game);
        inner.games.insert(game.id, game.clone());
        Ok(game)
    }

    async fn word_catalog(&self) -> Result<Vec<Word>, DomainError> {
        Ok(self.words.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> MemoryStore {
        MemoryStore::new(Vec::new())
    }

    #[tokio::test]
    async fn stale_version_is_rejected() {
        let store = store();
        let game = store
            .insert_game(Game::new(UserId::new(), OffsetDateTime::now_utc()))
            .await
            .unwrap();

        let saved = store.save_game(game.clone(), 0).await.unwrap();
        assert_eq!(saved.version, 1);

        let err = store.save_game(game, 0).await.unwrap_err();
        assert!(err.is_optimistic_lock(), "{err:?}");
    }

    #[tokio::test]
    async fn teams_resolve_to_their_game() {
        let store = store();
        let game = store
            .insert_game(Game::new(UserId::new(), OffsetDateTime::now_utc()))
            .await
            .unwrap();
        for team in &game.teams {
            assert_eq!(
                store.find_game_id_by_team(team.id).await.unwrap(),
                Some(game.id)
            );
        }
        assert_eq!(store.find_game_id_by_team(TeamId::new()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn duplicate_username_or_email_is_validation() {
        let store = store();
        let account = |name: &str, email: &str| Account {
            user: User {
                id: UserId::new(),
                username: name.to_string(),
                email: email.to_string(),
            },
            password_hash: "$argon2id$stub".to_string(),
        };
        store.create_user(account("ada", "ada@example.org")).await.unwrap();

        let err = store
            .create_user(account("ada", "other@example.org"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::Validation(ValidationKind::UsernameTaken, _)
        ));
        let err = store
            .create_user(account("lovelace", "ada@example.org"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::Validation(ValidationKind::EmailTaken, _)
        ));

        assert!(store.find_user_by_username("ada").await.unwrap().is_some());
        assert!(store.find_user_by_email("ada@example.org").await.unwrap().is_some());
        let stored = store.find_account("ada").await.unwrap().unwrap();
        assert_eq!(stored.password_hash, "$argon2id$stub");
    }
}
