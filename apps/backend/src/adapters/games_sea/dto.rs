//! Row <-> aggregate conversion for the games_sea adapter.

use std::collections::HashMap;

use sea_orm::prelude::Json;
use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::{
    Clue, Game, GameStatus, Round, RoundStatus, Team, Turn, TurnStatus, User, Word,
};
use crate::entities::{games, rounds, team_members, teams, turns, users, words};
use crate::errors::domain::DomainError;

impl From<GameStatus> for games::GameStatus {
    fn from(status: GameStatus) -> Self {
        match status {
            GameStatus::Created => Self::Created,
            GameStatus::InProgress => Self::InProgress,
            GameStatus::Finished => Self::Finished,
        }
    }
}

impl From<games::GameStatus> for GameStatus {
    fn from(status: games::GameStatus) -> Self {
        match status {
            games::GameStatus::Created => Self::Created,
            games::GameStatus::InProgress => Self::InProgress,
            games::GameStatus::Finished => Self::Finished,
        }
    }
}

impl From<RoundStatus> for rounds::RoundStatus {
    fn from(status: RoundStatus) -> Self {
        match status {
            RoundStatus::InProgress => Self::InProgress,
            RoundStatus::Finished => Self::Finished,
        }
    }
}

impl From<rounds::RoundStatus> for RoundStatus {
    fn from(status: rounds::RoundStatus) -> Self {
        match status {
            rounds::RoundStatus::InProgress => Self::InProgress,
            rounds::RoundStatus::Finished => Self::Finished,
        }
    }
}

impl From<TurnStatus> for turns::TurnStatus {
    fn from(status: TurnStatus) -> Self {
        match status {
            TurnStatus::Created => Self::Created,
            TurnStatus::InProgress => Self::InProgress,
            TurnStatus::Finished => Self::Finished,
        }
    }
}

impl From<turns::TurnStatus> for TurnStatus {
    fn from(status: turns::TurnStatus) -> Self {
        match status {
            turns::TurnStatus::Created => Self::Created,
            turns::TurnStatus::InProgress => Self::InProgress,
            turns::TurnStatus::Finished => Self::Finished,
        }
    }
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id.into(),
            username: model.username,
            email: model.email,
        }
    }
}

impl From<words::Model> for Word {
    fn from(model: words::Model) -> Self {
        Self {
            id: model.id.into(),
            text: model.text,
            lang: model.lang,
        }
    }
}

pub(super) fn to_json<T: Serialize>(board: &T) -> Result<Json, DomainError> {
    serde_json::to_value(board)
        .map_err(|e| DomainError::corrupted(format!("Board failed to encode: {e}")))
}

fn from_json<T: DeserializeOwned>(value: &Json, what: &str) -> Result<T, DomainError> {
    serde_json::from_value(value.clone())
        .map_err(|e| DomainError::corrupted(format!("Stored {what} board is malformed: {e}")))
}

fn narrow<T: TryFrom<i64>>(value: i64, what: &str) -> Result<T, DomainError> {
    T::try_from(value).map_err(|_| DomainError::corrupted(format!("Stored {what} {value} is out of range")))
}

/// Rows belonging to a set of games, grouped by parent id.
#[derive(Default)]
pub(super) struct ChildRows {
    pub teams: HashMap<Uuid, Vec<teams::Model>>,
    pub members: HashMap<Uuid, Vec<team_members::Model>>,
    pub rounds: HashMap<Uuid, Vec<rounds::Model>>,
    pub turns: HashMap<Uuid, Vec<turns::Model>>,
}

impl ChildRows {
    pub fn new(
        teams: Vec<teams::Model>,
        members: Vec<team_members::Model>,
        rounds: Vec<rounds::Model>,
        turns: Vec<turns::Model>,
    ) -> Self {
        let mut rows = Self::default();
        for team in teams {
            rows.teams.entry(team.game_id).or_default().push(team);
        }
        for member in members {
            rows.members.entry(member.team_id).or_default().push(member);
        }
        for round in rounds {
            rows.rounds.entry(round.game_id).or_default().push(round);
        }
        for turn in turns {
            rows.turns.entry(turn.round_id).or_default().push(turn);
        }
        rows
    }

    fn team(&self, model: &teams::Model) -> Result<Team, DomainError> {
        let mut members = self.members.get(&model.id).cloned().unwrap_or_default();
        members.sort_by_key(|m| m.position);
        Ok(Team {
            id: model.id.into(),
            game_id: model.game_id.into(),
            name: model.name.clone(),
            members: members.into_iter().map(|m| m.user_id.into()).collect(),
            number_of_cards: narrow(model.number_of_cards.into(), "number_of_cards")?,
        })
    }

    fn turn(model: &turns::Model) -> Result<Turn, DomainError> {
        let clue = match (&model.clue_word, model.clue_number) {
            (Some(word), Some(number)) => Some(Clue {
                word: word.clone(),
                number: narrow(number.into(), "clue_number")?,
            }),
            _ => None,
        };
        Ok(Turn {
            id: model.id.into(),
            round_id: model.round_id.into(),
            index: narrow(model.turn_index.into(), "turn_index")?,
            spymaster: model.spymaster_id.into(),
            clue,
            pointed: from_json(&model.pointed, "pointed")?,
            status: model.status.into(),
        })
    }

    fn round(&self, model: &rounds::Model) -> Result<Round, DomainError> {
        let mut turn_rows = self.turns.get(&model.id).cloned().unwrap_or_default();
        turn_rows.sort_by_key(|t| t.turn_index);
        Ok(Round {
            id: model.id.into(),
            game_id: model.game_id.into(),
            index: narrow(model.round_index.into(), "round_index")?,
            spymasters: [model.spymaster1_id.into(), model.spymaster2_id.into()],
            starting_team: model.starting_team_id.into(),
            map: from_json(&model.map, "map")?,
            words: from_json(&model.words, "words")?,
            progress: from_json(&model.progress, "progress")?,
            winner: model.winner_team_id.map(Into::into),
            status: model.status.into(),
            turns: turn_rows.iter().map(Self::turn).collect::<Result<_, _>>()?,
        })
    }

    /// Rebuild one aggregate from its game row and the grouped children.
    pub fn game(&self, model: games::Model) -> Result<Game, DomainError> {
        let mut team_rows = self.teams.get(&model.id).cloned().unwrap_or_default();
        team_rows.sort_by_key(|t| t.position);
        let [first, second] = team_rows.as_slice() else {
            return Err(DomainError::corrupted(format!(
                "Game {} has {} teams, expected 2",
                model.id,
                team_rows.len()
            )));
        };
        let teams = [self.team(first)?, self.team(second)?];

        let mut round_rows = self.rounds.get(&model.id).cloned().unwrap_or_default();
        round_rows.sort_by_key(|r| r.round_index);
        let rounds = round_rows
            .iter()
            .map(|r| self.round(r))
            .collect::<Result<_, _>>()?;

        Ok(Game {
            id: model.id.into(),
            host: model.host_id.into(),
            teams,
            rounds,
            winner: model.winner_team_id.map(Into::into),
            status: model.status.into(),
            number_of_rounds: narrow(model.number_of_rounds.into(), "number_of_rounds")?,
            version: model.version,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

pub(super) fn team_row(team: &Team, position: usize) -> teams::Model {
    teams::Model {
        id: team.id.0,
        game_id: team.game_id.0,
        position: position as i16,
        name: team.name.clone(),
        number_of_cards: i16::from(team.number_of_cards),
    }
}

pub(super) fn member_rows(team: &Team) -> Vec<team_members::Model> {
    team.members
        .iter()
        .enumerate()
        .map(|(position, user)| team_members::Model {
            team_id: team.id.0,
            user_id: user.0,
            position: position as i16,
        })
        .collect()
}

pub(super) fn round_row(round: &Round) -> Result<rounds::Model, DomainError> {
    Ok(rounds::Model {
        id: round.id.0,
        game_id: round.game_id.0,
        round_index: round.index as i32,
        spymaster1_id: round.spymasters[0].0,
        spymaster2_id: round.spymasters[1].0,
        starting_team_id: round.starting_team.0,
        map: to_json(&round.map)?,
        words: to_json(&round.words)?,
        progress: to_json(&round.progress)?,
        winner_team_id: round.winner.map(|t| t.0),
        status: round.status.into(),
    })
}

pub(super) fn turn_row(turn: &Turn) -> Result<turns::Model, DomainError> {
    Ok(turns::Model {
        id: turn.id.0,
        round_id: turn.round_id.0,
        turn_index: turn.index as i32,
        spymaster_id: turn.spymaster.0,
        clue_word: turn.clue.as_ref().map(|c| c.word.clone()),
        clue_number: turn.clue.as_ref().map(|c| i16::from(c.number)),
        pointed: to_json(&turn.pointed)?,
        status: turn.status.into(),
    })
}
