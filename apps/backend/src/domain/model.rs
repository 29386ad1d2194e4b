//! Entity graph for a single game.
//!
//! A `Game` owns its two teams and its rounds by value; each round owns its
//! turns. Children refer back to their parent by id only.

use std::fmt;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use super::board::{MapBoard, PointedBoard, ProgressBoard, WordsBoard};

macro_rules! entity_id {
    ($($name:ident),* $(,)?) => {$(
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self(Uuid::nil())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }
    )*};
}

entity_id!(UserId, GameId, TeamId, RoundId, TurnId, WordId);

/// Cards a team must find in a round.
pub const DEFAULT_CARDS: u8 = 6;
/// The starting team finds one extra card.
pub const STARTING_TEAM_CARDS: u8 = 7;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    pub id: WordId,
    pub text: String,
    pub lang: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    Created,
    InProgress,
    Finished,
}

impl GameStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::InProgress => "in_progress",
            Self::Finished => "finished",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundStatus {
    InProgress,
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnStatus {
    /// Waiting for the spymaster's clue.
    Created,
    InProgress,
    Finished,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub game_id: GameId,
    pub name: String,
    /// Join order; spymaster selection indexes into it.
    pub members: Vec<UserId>,
    pub number_of_cards: u8,
}

impl Team {
    pub fn new(game_id: GameId, name: impl Into<String>) -> Self {
        Self {
            id: TeamId::new(),
            game_id,
            name: name.into(),
            members: Vec::new(),
            number_of_cards: DEFAULT_CARDS,
        }
    }

    pub fn has_member(&self, user: UserId) -> bool {
        self.members.contains(&user)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clue {
    pub word: String,
    pub number: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub id: TurnId,
    pub round_id: RoundId,
    pub index: u32,
    pub spymaster: UserId,
    pub clue: Option<Clue>,
    pub pointed: PointedBoard,
    pub status: TurnStatus,
}

impl Turn {
    pub fn guess_count(&self) -> usize {
        self.pointed.iter().filter(|p| **p).count()
    }

    /// Guesses allowed after the clue: one more than the clue number.
    pub fn guess_quota(&self) -> Option<usize> {
        self.clue.as_ref().map(|c| c.number as usize + 1)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    pub id: RoundId,
    pub game_id: GameId,
    pub index: u32,
    /// Indexed by team position: `spymasters[0]` belongs to `teams[0]`.
    pub spymasters: [UserId; 2],
    pub starting_team: TeamId,
    pub map: MapBoard,
    pub words: WordsBoard,
    pub progress: ProgressBoard,
    pub winner: Option<TeamId>,
    pub status: RoundStatus,
    pub turns: Vec<Turn>,
}

impl Round {
    pub fn current_turn(&self) -> Option<&Turn> {
        self.turns.last()
    }

    pub fn is_finished(&self) -> bool {
        self.status == RoundStatus::Finished
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub id: GameId,
    pub host: UserId,
    pub teams: [Team; 2],
    pub rounds: Vec<Round>,
    pub winner: Option<TeamId>,
    pub status: GameStatus,
    /// Zero until the game starts.
    pub number_of_rounds: u32,
    /// Optimistic lock counter, bumped by the store on every save.
    pub version: i32,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl Game {
    pub fn new(host: UserId, now: OffsetDateTime) -> Self {
        let id = GameId::new();
        Self {
            id,
            host,
            teams: [Team::new(id, "Team 1"), Team::new(id, "Team 2")],
            rounds: Vec::new(),
            winner: None,
            status: GameStatus::Created,
            number_of_rounds: 0,
            version: 0,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn team_position(&self, team: TeamId) -> Option<usize> {
        self.teams.iter().position(|t| t.id == team)
    }

    pub fn team(&self, team: TeamId) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == team)
    }

    pub fn team_of(&self, user: UserId) -> Option<&Team> {
        self.teams.iter().find(|t| t.has_member(user))
    }

    pub fn opponent_of(&self, team: TeamId) -> Option<TeamId> {
        self.team_position(team).map(|pos| self.teams[1 - pos].id)
    }

    pub fn current_round(&self) -> Option<&Round> {
        self.rounds.last()
    }

    /// Locate a turn as `(round index, turn index)`.
    pub fn locate_turn(&self, turn: TurnId) -> Option<(usize, usize)> {
        self.rounds.iter().enumerate().find_map(|(r, round)| {
            round
                .turns
                .iter()
                .position(|t| t.id == turn)
                .map(|t| (r, t))
        })
    }

    pub fn round_wins(&self, team: TeamId) -> usize {
        self.rounds
            .iter()
            .filter(|r| r.winner == Some(team))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_game_has_two_named_teams() {
        let game = Game::new(UserId::new(), OffsetDateTime::UNIX_EPOCH);
        assert_eq!(game.teams[0].name, "Team 1");
        assert_eq!(game.teams[1].name, "Team 2");
        assert_ne!(game.teams[0].id, game.teams[1].id);
        assert!(game.teams.iter().all(|t| t.game_id == game.id));
        assert_eq!(game.status, GameStatus::Created);
        assert!(game.rounds.is_empty());
    }

    #[test]
    fn opponent_is_the_other_position() {
        let game = Game::new(UserId::new(), OffsetDateTime::UNIX_EPOCH);
        assert_eq!(game.opponent_of(game.teams[0].id), Some(game.teams[1].id));
        assert_eq!(game.opponent_of(game.teams[1].id), Some(game.teams[0].id));
        assert_eq!(game.opponent_of(TeamId::new()), None);
    }

    #[test]
    fn ids_serialize_as_plain_uuids() {
        let id = TeamId(Uuid::nil());
        assert_eq!(
            serde_json::to_string(&id).unwrap(),
            "\"00000000-0000-0000-0000-000000000000\""
        );
    }
}
