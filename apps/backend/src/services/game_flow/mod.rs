//! Engine operations: load the game aggregate, apply a domain transition,
//! save it under the optimistic lock, then announce what happened.

use std::sync::Arc;

use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::warn;

use crate::config::game::GameConfig;
use crate::domain::board::CELL_COUNT;
use crate::domain::{Game, GameId, TeamId, TurnId, Word};
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::realtime::Notifier;
use crate::repos::GameStore;

mod lobby;
mod mutation;
mod player_actions;
mod round_lifecycle;

pub use player_actions::GuessReport;

pub struct GameFlowService {
    store: Arc<dyn GameStore>,
    notifier: Arc<dyn Notifier>,
    rng: Mutex<ChaCha8Rng>,
    catalog: OnceCell<Arc<Vec<Word>>>,
    config: GameConfig,
}

impl GameFlowService {
    pub fn new(store: Arc<dyn GameStore>, notifier: Arc<dyn Notifier>, config: GameConfig) -> Self {
        let rng = match config.rng_seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_os_rng(),
        };
        Self {
            store,
            notifier,
            rng: Mutex::new(rng),
            catalog: OnceCell::new(),
            config,
        }
    }

    pub fn store(&self) -> &Arc<dyn GameStore> {
        &self.store
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub(crate) async fn require_game(&self, id: GameId) -> Result<Game, DomainError> {
        self.store
            .find_game(id)
            .await?
            .ok_or_else(|| DomainError::not_found(NotFoundKind::Game, format!("Game {id} not found")))
    }

    async fn game_id_for_team(&self, team: TeamId) -> Result<GameId, DomainError> {
        self.store
            .find_game_id_by_team(team)
            .await?
            .ok_or_else(|| DomainError::not_found(NotFoundKind::Team, format!("Team {team} not found")))
    }

    async fn game_id_for_turn(&self, turn: TurnId) -> Result<GameId, DomainError> {
        self.store
            .find_game_id_by_turn(turn)
            .await?
            .ok_or_else(|| DomainError::not_found(NotFoundKind::Turn, format!("Turn {turn} not found")))
    }

    /// Word catalog, cached once it is large enough to deal a board.
    ///
    /// A short catalog is returned uncached so board generation reports
    /// `InsufficientData` and a later seed is picked up.
    async fn catalog(&self) -> Result<Arc<Vec<Word>>, DomainError> {
        if let Some(words) = self.catalog.get() {
            return Ok(Arc::clone(words));
        }
        let words = Arc::new(self.store.word_catalog().await?);
        if words.len() >= CELL_COUNT {
            let _ = self.catalog.set(Arc::clone(&words));
        }
        Ok(words)
    }

    /// Fire-and-forget: failures are logged and never undo the saved state.
    async fn publish<E: Serialize + Sync>(&self, topic: &str, event: &E) {
        let payload = match serde_json::to_value(event) {
            Ok(payload) => payload,
            Err(err) => {
                warn!(topic, error = %err, "Failed to encode event");
                return;
            }
        };
        if let Err(err) = self.notifier.publish(topic, payload).await {
            warn!(topic, error = %err, "Failed to publish event");
        }
    }
}

fn locate(game: &Game, turn: TurnId) -> Result<(usize, usize), DomainError> {
    game.locate_turn(turn)
        .ok_or_else(|| DomainError::not_found(NotFoundKind::Turn, format!("Turn {turn} not found")))
}
