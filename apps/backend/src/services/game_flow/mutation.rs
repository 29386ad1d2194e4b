use rand_chacha::ChaCha8Rng;
use tracing::{debug, warn};

use super::GameFlowService;
use crate::domain::{Game, GameId, Word};
use crate::errors::domain::DomainError;

impl GameFlowService {
    /// Run `mutation` against a fresh copy of the game and save it.
    ///
    /// On an optimistic lock conflict the game is reloaded and the mutation
    /// re-run from scratch, so its checks see the winning writer's state.
    pub(super) async fn mutate<T, F>(
        &self,
        game_id: GameId,
        mut mutation: F,
    ) -> Result<(Game, T), DomainError>
    where
        T: Send,
        F: FnMut(&mut Game) -> Result<T, DomainError> + Send,
    {
        self.mutate_dealing(game_id, &[], |game, _, _| mutation(game))
            .await
    }

    /// Like [`Self::mutate`], for transitions that may deal a new round.
    pub(super) async fn mutate_dealing<T, F>(
        &self,
        game_id: GameId,
        catalog: &[Word],
        mut mutation: F,
    ) -> Result<(Game, T), DomainError>
    where
        T: Send,
        F: FnMut(&mut Game, &[Word], &mut ChaCha8Rng) -> Result<T, DomainError> + Send,
    {
        let mut attempt: u32 = 0;
        loop {
            attempt += 1;
            let mut game = self.require_game(game_id).await?;
            let expected_version = game.version;

            let value = {
                let mut rng = self.rng.lock();
                mutation(&mut game, catalog, &mut rng)?
            };

            match self.store.save_game(game, expected_version).await {
                Ok(saved) => {
                    debug!(game_id = %game_id, version = saved.version, attempt, "Mutation saved");
                    return Ok((saved, value));
                }
                Err(err) if err.is_optimistic_lock() && attempt <= self.config.mutation_retries => {
                    warn!(
                        game_id = %game_id,
                        attempt,
                        expected_version,
                        "Concurrent update detected, retrying mutation"
                    );
                }
                Err(err) => return Err(err),
            }
        }
    }
}
