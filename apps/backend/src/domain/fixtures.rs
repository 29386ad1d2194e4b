//! Builders shared by the domain unit tests.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use time::OffsetDateTime;

use super::board::{Coord, MapCell};
use super::game::start_game;
use super::model::{Game, GameId, Round, Team, TeamId, UserId, Word, WordId};
use super::turn::give_evidence;

pub fn teams_with_cards(first: u8, second: u8) -> (Team, Team) {
    let game_id = GameId::new();
    let mut team1 = Team::new(game_id, "Team 1");
    let mut team2 = Team::new(game_id, "Team 2");
    team1.number_of_cards = first;
    team2.number_of_cards = second;
    (team1, team2)
}

pub fn catalog(size: usize) -> Vec<Word> {
    (0..size)
        .map(|i| Word {
            id: WordId::new(),
            text: format!("word{i}"),
            lang: "en".into(),
        })
        .collect()
}

pub fn empty_game() -> Game {
    Game::new(UserId::new(), OffsetDateTime::UNIX_EPOCH)
}

/// A game in the lobby with `per_team` players on each side.
pub fn lobby(per_team: usize) -> Game {
    let mut game = empty_game();
    for team in game.teams.iter_mut() {
        team.members = (0..per_team).map(|_| UserId::new()).collect();
    }
    game
}

pub fn started(per_team: usize, seed: u64) -> Game {
    let mut game = lobby(per_team);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    start_game(&mut game, &catalog(30), &mut rng, None).unwrap();
    game
}

/// Started game whose first turn already has the clue `(word, number)`.
pub fn clued(per_team: usize, seed: u64, number: u8) -> Game {
    let mut game = started(per_team, seed);
    let spymaster = game.rounds[0].turns[0].spymaster;
    give_evidence(&mut game.rounds[0].turns[0], spymaster, "fruit", number).unwrap();
    game
}

/// Team whose spymaster gives the current turn's clue.
pub fn clue_team(game: &Game) -> TeamId {
    let turn = game.rounds.last().unwrap().turns.last().unwrap();
    game.team_of(turn.spymaster).unwrap().id
}

/// A non-spymaster member of the clue team.
pub fn guesser(game: &Game) -> UserId {
    let round = game.rounds.last().unwrap();
    let spymaster = round.turns.last().unwrap().spymaster;
    let team = game.team_of(spymaster).unwrap();
    *team.members.iter().find(|m| **m != spymaster).unwrap()
}

pub fn cells_where(round: &Round, pred: impl Fn(&MapCell) -> bool) -> Vec<Coord> {
    round
        .map
        .cells()
        .filter(|(_, cell)| pred(cell))
        .map(|(at, _)| at)
        .collect()
}
