use serde::Serialize;
use tracing::debug;

use super::round_lifecycle::advance_rounds;
use super::{locate, GameFlowService};
use crate::domain::turn::{finish_turn, give_evidence, guess, MAX_CLUE_NUMBER};
use crate::domain::{Game, GuessOutcome, RoundAdvance, Turn, TurnId, UserId};
use crate::errors::domain::{DomainError, ValidationKind};
use crate::realtime::{game_topic, GameEvent};

/// Result of an accepted guess together with the saved game.
#[derive(Debug, Clone, Serialize)]
pub struct GuessReport {
    pub guess: GuessOutcome,
    pub game: Game,
}

impl GameFlowService {
    /// Spymaster submits the clue that opens guessing on `turn`.
    pub async fn give_evidence(
        &self,
        turn: TurnId,
        caller: UserId,
        word: &str,
        number: i64,
    ) -> Result<Turn, DomainError> {
        debug!(turn_id = %turn, user_id = %caller, number, "Giving evidence");
        let number = u8::try_from(number).map_err(|_| {
            DomainError::validation(
                ValidationKind::InvalidClue,
                format!("Clue number must be between 0 and {MAX_CLUE_NUMBER}"),
            )
        })?;
        let game_id = self.game_id_for_turn(turn).await?;

        let (game, (r, t)) = self
            .mutate(game_id, |game| {
                let (r, t) = locate(game, turn)?;
                give_evidence(&mut game.rounds[r].turns[t], caller, word, number)?;
                Ok((r, t))
            })
            .await?;
        let saved = game.rounds[r].turns[t].clone();

        if let Some(clue) = &saved.clue {
            self.publish(
                &game_topic(game.id),
                &GameEvent::EvidenceGiven {
                    game: game.id,
                    turn: saved.id,
                    word: clue.word.clone(),
                    number: clue.number,
                },
            )
            .await;
        }
        Ok(saved)
    }

    /// A guessing teammate reveals the cell at `(row, col)`.
    ///
    /// When the guess ends the round, the next round is dealt (or the game
    /// finished) in the same save.
    pub async fn guess(
        &self,
        turn: TurnId,
        caller: UserId,
        row: i64,
        col: i64,
    ) -> Result<GuessReport, DomainError> {
        debug!(turn_id = %turn, user_id = %caller, row, col, "Guessing");
        let game_id = self.game_id_for_turn(turn).await?;
        let catalog = self.catalog().await?;

        let (game, (outcome, finished_round, advance)) = self
            .mutate_dealing(game_id, &catalog, |game, words, rng| {
                let at = locate(game, turn)?;
                let round_id = game.rounds[at.0].id;
                let outcome = guess(game, at, caller, row, col)?;
                let advance = if outcome.ended_round() {
                    advance_rounds(game, words, rng)?
                } else {
                    RoundAdvance::Continue
                };
                Ok((outcome, round_id, advance))
            })
            .await?;

        self.publish(
            &game_topic(game.id),
            &GameEvent::GuessMade {
                game: game.id,
                turn,
                guess: outcome,
            },
        )
        .await;
        if outcome.ended_round() {
            self.announce_round_end(&game, finished_round, advance).await;
        }

        Ok(GuessReport {
            guess: outcome,
            game,
        })
    }

    /// A guessing teammate passes; the other team's spymaster is up next.
    pub async fn finish_turn(&self, turn: TurnId, caller: UserId) -> Result<Game, DomainError> {
        debug!(turn_id = %turn, user_id = %caller, "Finishing turn");
        let game_id = self.game_id_for_turn(turn).await?;

        let (game, next) = self
            .mutate(game_id, |game| {
                let at = locate(game, turn)?;
                finish_turn(game, at, caller)
            })
            .await?;

        self.publish(
            &game_topic(game.id),
            &GameEvent::TurnFinished {
                game: game.id,
                turn,
            },
        )
        .await;
        if next.is_some() {
            self.announce_current_turn(&game).await;
        }
        Ok(game)
    }
}
