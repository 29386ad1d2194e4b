use std::sync::Arc;

use crate::adapters::{MemoryStore, SeaStore};
use crate::config::db::StoreConfig;
use crate::config::game::GameConfig;
use crate::domain::Word;
use crate::error::AppError;
use crate::infra::db::bootstrap_db;
use crate::realtime::{Notifier, TopicRegistry};
use crate::repos::GameStore;
use crate::services::GameFlowService;
use crate::state::app_state::AppState;
use crate::state::security_config::SecurityConfig;

/// Builder for creating AppState instances (used in both tests and main)
pub struct StateBuilder {
    security_config: SecurityConfig,
    store_config: StoreConfig,
    game_config: GameConfig,
    notifier: Option<Arc<dyn Notifier>>,
    words: Option<Vec<Word>>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            security_config: SecurityConfig::default(),
            store_config: StoreConfig::Memory,
            game_config: GameConfig::default(),
            notifier: None,
            words: None,
        }
    }

    pub fn with_store(mut self, store_config: StoreConfig) -> Self {
        self.store_config = store_config;
        self
    }

    pub fn with_security(mut self, security_config: SecurityConfig) -> Self {
        self.security_config = security_config;
        self
    }

    pub fn with_game_config(mut self, game_config: GameConfig) -> Self {
        self.game_config = game_config;
        self
    }

    /// Defaults to an in-process [`TopicRegistry`].
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Word catalog for the in-memory store; ignored for databases.
    pub fn with_words(mut self, words: Vec<Word>) -> Self {
        self.words = Some(words);
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        let (store, db): (Arc<dyn GameStore>, _) = match self.store_config {
            StoreConfig::Memory => {
                let store = match self.words {
                    Some(words) => MemoryStore::new(words),
                    None => MemoryStore::with_default_catalog(),
                };
                (Arc::new(store), None)
            }
            StoreConfig::Database { url } => {
                // single entrypoint: connect + migrate
                let conn = bootstrap_db(&url).await?;
                (Arc::new(SeaStore::new(conn.clone())), Some(conn))
            }
        };
        let notifier = self
            .notifier
            .unwrap_or_else(|| Arc::new(TopicRegistry::new()));

        let games = Arc::new(GameFlowService::new(store, notifier, self.game_config));
        Ok(AppState::new(games, db, self.security_config))
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
