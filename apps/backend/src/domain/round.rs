//! Round creation and round-winner detection.

use rand::Rng;

use super::board::MapCell;
use super::board_gen::{generate_basic_board, generate_map, generate_words_board};
use super::model::{
    Game, Round, RoundId, RoundStatus, Team, TeamId, Word, DEFAULT_CARDS, STARTING_TEAM_CARDS,
};
use super::roster::require_even_teams;
use super::turn::open_turn;
use crate::errors::domain::DomainError;

/// Start the game's next round and its first turn.
///
/// Every player serves as spymaster once per roster cycle, in join order
/// for both teams. Nothing on `game` changes if board generation fails.
pub fn create_round<R: Rng + ?Sized>(
    game: &mut Game,
    catalog: &[Word],
    rng: &mut R,
) -> Result<RoundId, DomainError> {
    let roster_size = require_even_teams(game)?;
    let slot = game.rounds.len() % roster_size;
    let spymasters = [game.teams[0].members[slot], game.teams[1].members[slot]];

    let starting = usize::from(rng.random_bool(0.5));
    let mut teams = game.teams.clone();
    for (pos, team) in teams.iter_mut().enumerate() {
        team.number_of_cards = if pos == starting {
            STARTING_TEAM_CARDS
        } else {
            DEFAULT_CARDS
        };
    }

    let words = generate_words_board(catalog, rng)?;
    let map = generate_map(&teams[0], &teams[1], rng)?;

    let mut round = Round {
        id: RoundId::new(),
        game_id: game.id,
        index: game.rounds.len() as u32,
        spymasters,
        starting_team: teams[starting].id,
        map,
        words,
        progress: generate_basic_board(),
        winner: None,
        status: RoundStatus::InProgress,
        turns: Vec::new(),
    };
    open_turn(&mut round, &teams);

    let id = round.id;
    game.teams = teams;
    game.rounds.push(round);
    Ok(id)
}

/// A team wins once every cell it owns on the map has been claimed.
///
/// Team 1 is checked first.
pub fn check_for_winner(teams: &[Team; 2], round: &Round) -> Option<TeamId> {
    teams.iter().map(|t| t.id).find(|&team| {
        round
            .map
            .cells()
            .filter(|(_, cell)| **cell == MapCell::Owner(team))
            .all(|(at, _)| round.progress.get(at).is_some())
    })
}
