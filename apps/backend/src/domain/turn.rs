//! Per-turn clue and guess protocol.
//!
//! A turn moves `Created → InProgress → Finished`. The spymaster opens it
//! with a clue; their teammates then guess cells until the quota is used,
//! the round ends, or a teammate ends the turn.

use serde::Serialize;

use super::board::{Coord, MapCell};
use super::board_gen::generate_basic_board;
use super::model::{Clue, Game, Round, RoundStatus, Team, TeamId, Turn, TurnId, TurnStatus, UserId};
use super::round::check_for_winner;
use crate::errors::domain::{ConflictKind, DomainError, ForbiddenKind, ValidationKind};

pub const MAX_CLUE_LEN: usize = 127;
pub const MAX_CLUE_NUMBER: u8 = 25;

/// What a single accepted guess did to the round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum GuessResult {
    /// Turn stays open.
    Continue,
    /// Guessing team found its last cell, or the opponent did through this guess.
    RoundWon { winner: TeamId },
    /// The bomb was revealed; the other team takes the round.
    BombHit { winner: TeamId },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GuessOutcome {
    pub coord: Coord,
    pub cell: MapCell,
    #[serde(flatten)]
    pub result: GuessResult,
}

impl GuessOutcome {
    pub fn ended_round(&self) -> bool {
        !matches!(self.result, GuessResult::Continue)
    }
}

/// Spymaster for the turn at `index`.
///
/// The starting team's spymaster clues on even turns, the other on odd ones.
pub fn spymaster_for(round: &Round, teams: &[Team; 2], index: usize) -> UserId {
    let mut order = round.spymasters;
    let starting_has_second = teams
        .iter()
        .find(|t| t.id == round.starting_team)
        .is_some_and(|t| t.has_member(order[1]));
    if starting_has_second {
        order.reverse();
    }
    order[index % 2]
}

/// Append the round's next turn, awaiting a clue.
pub fn open_turn(round: &mut Round, teams: &[Team; 2]) -> TurnId {
    let index = round.turns.len();
    let turn = Turn {
        id: TurnId::new(),
        round_id: round.id,
        index: index as u32,
        spymaster: spymaster_for(round, teams, index),
        clue: None,
        pointed: generate_basic_board(),
        status: TurnStatus::Created,
    };
    let id = turn.id;
    round.turns.push(turn);
    id
}

pub fn give_evidence(
    turn: &mut Turn,
    caller: UserId,
    word: &str,
    number: u8,
) -> Result<(), DomainError> {
    if turn.spymaster != caller {
        return Err(DomainError::validation(
            ValidationKind::NotSpymaster,
            "You are not the spymaster for this turn",
        ));
    }
    match turn.status {
        TurnStatus::Created => {}
        TurnStatus::Finished => {
            return Err(DomainError::validation(
                ValidationKind::TurnFinished,
                "This turn has already finished",
            ))
        }
        TurnStatus::InProgress => {
            return Err(DomainError::validation(
                ValidationKind::EvidenceAlreadyGiven,
                "The clue for this turn was already given",
            ))
        }
    }

    let word = word.trim();
    if word.is_empty()
        || word.chars().count() > MAX_CLUE_LEN
        || word.chars().any(char::is_whitespace)
    {
        return Err(DomainError::validation(
            ValidationKind::InvalidClue,
            "Clue must be a single word",
        ));
    }
    if number > MAX_CLUE_NUMBER {
        return Err(DomainError::validation(
            ValidationKind::InvalidClue,
            format!("Clue number must be at most {MAX_CLUE_NUMBER}"),
        ));
    }

    turn.clue = Some(Clue {
        word: word.to_string(),
        number,
    });
    turn.status = TurnStatus::InProgress;
    Ok(())
}

/// Caller may act on the clue: not the spymaster, and on the spymaster's team.
///
/// Returns the caller's team.
fn require_guesser(teams: &[Team; 2], turn: &Turn, caller: UserId) -> Result<TeamId, DomainError> {
    if turn.status != TurnStatus::InProgress {
        return Err(DomainError::validation(
            ValidationKind::TurnNotInProgress,
            "This turn is not accepting guesses",
        ));
    }
    if turn.spymaster == caller {
        return Err(DomainError::forbidden(
            ForbiddenKind::SpymasterCannotAct,
            "The spymaster cannot guess",
        ));
    }
    teams
        .iter()
        .find(|t| t.has_member(turn.spymaster) && t.has_member(caller))
        .map(|t| t.id)
        .ok_or_else(|| {
            DomainError::forbidden(
                ForbiddenKind::NotOnClueTeam,
                "Only the spymaster's team may act on this clue",
            )
        })
}

fn close_round(round: &mut Round, turn_idx: usize, winner: TeamId) {
    round.winner = Some(winner);
    round.status = RoundStatus::Finished;
    round.turns[turn_idx].status = TurnStatus::Finished;
}

/// Adjudicate a guess on the turn at `(round_idx, turn_idx)`.
pub fn guess(
    game: &mut Game,
    (round_idx, turn_idx): (usize, usize),
    caller: UserId,
    row: i64,
    col: i64,
) -> Result<GuessOutcome, DomainError> {
    let Game { teams, rounds, .. } = game;
    let round = rounds
        .get_mut(round_idx)
        .ok_or_else(|| DomainError::corrupted("Turn points at a missing round"))?;
    let turn = round
        .turns
        .get(turn_idx)
        .ok_or_else(|| DomainError::corrupted("Turn index out of range"))?;

    let team = require_guesser(teams, turn, caller)?;
    let at = Coord::new(row, col)?;

    let quota = turn.guess_quota().unwrap_or(0);
    if turn.guess_count() >= quota {
        return Err(DomainError::conflict(
            ConflictKind::GuessQuotaReached,
            format!("All {quota} guesses for this clue have been used"),
        ));
    }
    if *turn.pointed.get(at) {
        return Err(DomainError::conflict(
            ConflictKind::CellAlreadyGuessed,
            format!("Cell {at} was already guessed this turn"),
        ));
    }

    round.turns[turn_idx].pointed.set(at, true);
    if round.progress.get(at).is_none() {
        round.progress.set(at, Some(team));
    }

    let cell = *round.map.get(at);
    let result = if cell == MapCell::Bomb {
        let winner = teams
            .iter()
            .find(|t| t.id != team)
            .map(|t| t.id)
            .ok_or_else(|| DomainError::corrupted("Game has no opposing team"))?;
        close_round(round, turn_idx, winner);
        GuessResult::BombHit { winner }
    } else if let Some(winner) = check_for_winner(teams, round) {
        close_round(round, turn_idx, winner);
        GuessResult::RoundWon { winner }
    } else {
        GuessResult::Continue
    };

    Ok(GuessOutcome {
        coord: at,
        cell,
        result,
    })
}

/// End the turn on request of a guessing teammate and open the next one.
///
/// Returns the id of the new turn, or `None` when the round is already over.
pub fn finish_turn(
    game: &mut Game,
    (round_idx, turn_idx): (usize, usize),
    caller: UserId,
) -> Result<Option<TurnId>, DomainError> {
    let Game { teams, rounds, .. } = game;
    let round = rounds
        .get_mut(round_idx)
        .ok_or_else(|| DomainError::corrupted("Turn points at a missing round"))?;
    let turn = round
        .turns
        .get_mut(turn_idx)
        .ok_or_else(|| DomainError::corrupted("Turn index out of range"))?;

    require_guesser(teams, turn, caller)?;
    turn.status = TurnStatus::Finished;

    if round.is_finished() {
        return Ok(None);
    }
    Ok(Some(open_turn(round, teams)))
}
