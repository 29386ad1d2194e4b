//! Per-viewer projection of a game.
//!
//! The ownership map of a round in play is shown only to that round's
//! spymasters. Everyone sees it once the round is over.

use std::collections::HashMap;

use serde::Serialize;
use time::OffsetDateTime;

use super::board::{MapBoard, PointedBoard, ProgressBoard};
use super::model::{
    Clue, Game, GameId, GameStatus, Round, RoundId, RoundStatus, Team, TeamId, Turn, TurnId,
    TurnStatus, UserId, Word, WordId,
};
use crate::errors::domain::DomainError;

#[derive(Debug, Clone, Serialize)]
pub struct TurnView {
    pub id: TurnId,
    pub index: u32,
    pub spymaster: UserId,
    pub clue: Option<Clue>,
    pub pointed: PointedBoard,
    pub status: TurnStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct RoundView {
    pub id: RoundId,
    pub index: u32,
    pub spymasters: [UserId; 2],
    pub starting_team: TeamId,
    /// Word texts, row-major.
    pub words: Vec<Vec<String>>,
    pub progress: ProgressBoard,
    pub map: Option<MapBoard>,
    pub winner: Option<TeamId>,
    pub status: RoundStatus,
    pub turns: Vec<TurnView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GameView {
    pub id: GameId,
    pub host: UserId,
    pub teams: [Team; 2],
    pub rounds: Vec<RoundView>,
    pub winner: Option<TeamId>,
    pub status: GameStatus,
    pub number_of_rounds: u32,
    pub version: i32,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

fn turn_view(turn: &Turn) -> TurnView {
    TurnView {
        id: turn.id,
        index: turn.index,
        spymaster: turn.spymaster,
        clue: turn.clue.clone(),
        pointed: turn.pointed,
        status: turn.status,
    }
}

fn round_view(
    round: &Round,
    viewer: UserId,
    texts: &HashMap<WordId, &str>,
) -> Result<RoundView, DomainError> {
    let words = round
        .words
        .rows()
        .iter()
        .map(|row| {
            row.iter()
                .map(|id| {
                    texts.get(id).map(|t| t.to_string()).ok_or_else(|| {
                        DomainError::corrupted(format!("Round {} uses unknown word {id}", round.id))
                    })
                })
                .collect::<Result<Vec<_>, _>>()
        })
        .collect::<Result<Vec<_>, _>>()?;

    let reveal = round.is_finished() || round.spymasters.contains(&viewer);
    Ok(RoundView {
        id: round.id,
        index: round.index,
        spymasters: round.spymasters,
        starting_team: round.starting_team,
        words,
        progress: round.progress,
        map: reveal.then_some(round.map),
        winner: round.winner,
        status: round.status,
        turns: round.turns.iter().map(turn_view).collect(),
    })
}

pub fn game_view(game: &Game, viewer: UserId, catalog: &[Word]) -> Result<GameView, DomainError> {
    let texts: HashMap<WordId, &str> = catalog.iter().map(|w| (w.id, w.text.as_str())).collect();
    Ok(GameView {
        id: game.id,
        host: game.host,
        teams: game.teams.clone(),
        rounds: game
            .rounds
            .iter()
            .map(|r| round_view(r, viewer, &texts))
            .collect::<Result<_, _>>()?,
        winner: game.winner,
        status: game.status,
        number_of_rounds: game.number_of_rounds,
        version: game.version,
        updated_at: game.updated_at,
    })
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;
    use crate::domain::fixtures::{catalog, lobby};
    use crate::domain::game::start_game;

    fn started_with(words: &[Word]) -> Game {
        let mut game = lobby(2);
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        start_game(&mut game, words, &mut rng, None).unwrap();
        game
    }

    #[test]
    fn map_hidden_from_guessers_until_round_ends() {
        let words = catalog(30);
        let mut game = started_with(&words);
        let spymaster = game.rounds[0].spymasters[0];
        let guesser = game.teams[0].members[1];

        assert!(game_view(&game, spymaster, &words).unwrap().rounds[0].map.is_some());
        assert!(game_view(&game, guesser, &words).unwrap().rounds[0].map.is_none());

        game.rounds[0].status = RoundStatus::Finished;
        assert!(game_view(&game, guesser, &words).unwrap().rounds[0].map.is_some());
    }

    #[test]
    fn words_resolve_to_text() {
        let words = catalog(30);
        let game = started_with(&words);
        let view = game_view(&game, UserId::new(), &words).unwrap();
        let first = *game.rounds[0].words.iter().next().unwrap();
        let text = &words.iter().find(|w| w.id == first).unwrap().text;
        assert_eq!(&view.rounds[0].words[0][0], text);
    }

    #[test]
    fn unknown_word_is_corruption() {
        let words = catalog(30);
        let game = started_with(&words);
        assert!(matches!(
            game_view(&game, UserId::new(), &words[..1]),
            Err(DomainError::Infra(_, _))
        ));
    }
}
