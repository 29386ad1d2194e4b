//! Game lifecycle: start, and what happens when a round ends.

use rand::Rng;

use super::model::{Game, GameStatus, RoundId, TeamId, Word};
use super::roster::require_even_teams;
use super::round::create_round;
use crate::errors::domain::{DomainError, ValidationKind};

/// Next step after a guess or turn change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundAdvance {
    /// Current round is still being played.
    Continue,
    /// Current round is over and another one must be dealt.
    NextRoundRequired,
    /// Last round is over; the game has been closed.
    GameFinished { winner: TeamId },
}

/// Leave the lobby: fix the round count and deal the first round.
///
/// `rounds` overrides the default of one round per roster slot.
pub fn start_game<R: Rng + ?Sized>(
    game: &mut Game,
    catalog: &[Word],
    rng: &mut R,
    rounds: Option<u32>,
) -> Result<RoundId, DomainError> {
    if game.status != GameStatus::Created {
        return Err(DomainError::validation(
            ValidationKind::GameAlreadyStarted,
            "Game has already started",
        ));
    }
    let roster_size = require_even_teams(game)?;

    let round = create_round(game, catalog, rng)?;
    game.number_of_rounds = rounds.unwrap_or(roster_size as u32).max(1);
    game.status = GameStatus::InProgress;
    Ok(round)
}

/// Decide what follows the current round.
///
/// Finishes the game once `number_of_rounds` rounds are complete. The team
/// with more round wins takes the game; a tie goes to the last round's winner.
pub fn settle_round(game: &mut Game) -> RoundAdvance {
    let Some(last) = game.current_round() else {
        return RoundAdvance::Continue;
    };
    let Some(last_winner) = last.winner.filter(|_| last.is_finished()) else {
        return RoundAdvance::Continue;
    };
    if (game.rounds.len() as u32) < game.number_of_rounds {
        return RoundAdvance::NextRoundRequired;
    }

    let [team1, team2] = [game.teams[0].id, game.teams[1].id];
    let winner = match game.round_wins(team1).cmp(&game.round_wins(team2)) {
        std::cmp::Ordering::Greater => team1,
        std::cmp::Ordering::Less => team2,
        std::cmp::Ordering::Equal => last_winner,
    };
    game.winner = Some(winner);
    game.status = GameStatus::Finished;
    RoundAdvance::GameFinished { winner }
}
