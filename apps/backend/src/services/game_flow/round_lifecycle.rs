use rand::Rng;
use tracing::info;

use super::GameFlowService;
use crate::domain::round::create_round;
use crate::domain::{settle_round, Game, RoundAdvance, RoundId, Word};
use crate::errors::domain::DomainError;
use crate::realtime::{game_topic, GameEvent, LifecycleEvent, LifecycleStatus, SEARCHING_TOPIC};

/// Close out a finished round: deal the next one or finish the game.
pub(super) fn advance_rounds<R: Rng + ?Sized>(
    game: &mut Game,
    catalog: &[Word],
    rng: &mut R,
) -> Result<RoundAdvance, DomainError> {
    let advance = settle_round(game);
    if advance == RoundAdvance::NextRoundRequired {
        create_round(game, catalog, rng)?;
    }
    Ok(advance)
}

impl GameFlowService {
    pub(super) async fn announce_round_end(
        &self,
        game: &Game,
        finished: RoundId,
        advance: RoundAdvance,
    ) {
        let topic = game_topic(game.id);
        if let Some(winner) = game
            .rounds
            .iter()
            .find(|r| r.id == finished)
            .and_then(|r| r.winner)
        {
            info!(game_id = %game.id, round_id = %finished, winner = %winner, "Round finished");
            self.publish(
                &topic,
                &GameEvent::RoundFinished {
                    game: game.id,
                    round: finished,
                    winner,
                },
            )
            .await;
        }

        match advance {
            RoundAdvance::Continue => {}
            RoundAdvance::NextRoundRequired => {
                info!(game_id = %game.id, round = game.rounds.len(), "Next round dealt");
                self.announce_current_turn(game).await;
            }
            RoundAdvance::GameFinished { winner } => {
                info!(game_id = %game.id, winner = %winner, "Game finished");
                self.publish(
                    SEARCHING_TOPIC,
                    &LifecycleEvent {
                        game: game.id,
                        status: LifecycleStatus::Finished,
                    },
                )
                .await;
            }
        }
    }
}
