#![allow(dead_code)]

use std::sync::Arc;

use codenames_backend::adapters::MemoryStore;
use codenames_backend::config::game::GameConfig;
use codenames_backend::domain::{Coord, Game, MapCell, Round, TeamId, Turn, User, UserId};
use codenames_backend::realtime::TopicRegistry;
use codenames_backend::repos::GameStore;
use codenames_backend::auth::password::PasswordHashing;
use codenames_backend::services::users::{register_user, Registration};
use codenames_backend::services::GameFlowService;

// Logging is auto-installed for every test binary
#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}

/// Engine over an in-memory store with a fixed board seed.
pub struct Harness {
    pub store: Arc<MemoryStore>,
    pub registry: Arc<TopicRegistry>,
    pub games: GameFlowService,
}

pub fn harness(seed: u64) -> Harness {
    harness_with(GameConfig {
        rng_seed: Some(seed),
        ..GameConfig::default()
    })
}

pub fn harness_with(config: GameConfig) -> Harness {
    let store = Arc::new(MemoryStore::with_default_catalog());
    let registry = Arc::new(TopicRegistry::new());
    let games = GameFlowService::new(store.clone(), registry.clone(), config);
    Harness {
        store,
        registry,
        games,
    }
}

pub const TEST_PASSWORD: &str = "correct-horse";

/// Register `name` with a derived email and [`TEST_PASSWORD`].
pub async fn register(store: &dyn GameStore, name: &str) -> User {
    let email = format!("{name}@example.test");
    let registration = Registration {
        username: name,
        email: &email,
        password: TEST_PASSWORD,
    };
    register_user(store, &PasswordHashing::low_cost(), registration)
        .await
        .expect("register test user")
}

/// A lobby with `per_team` registered players on each team, host on team 1.
pub async fn lobby(h: &Harness, per_team: usize) -> (Game, Vec<UserId>, Vec<UserId>) {
    let mut team1 = Vec::new();
    let mut team2 = Vec::new();
    for i in 0..per_team {
        team1.push(register(h.store.as_ref(), &format!("red{i}")).await.id);
        team2.push(register(h.store.as_ref(), &format!("blue{i}")).await.id);
    }
    let game = h.games.create_game(team1[0]).await.expect("create game");
    let [t1, t2] = [game.teams[0].id, game.teams[1].id];
    for user in &team1 {
        h.games.join_team(t1, *user).await.expect("join team 1");
    }
    let mut game = game;
    for user in &team2 {
        game = h.games.join_team(t2, *user).await.expect("join team 2");
    }
    (game, team1, team2)
}

/// A started game with `per_team` players per team.
pub async fn started(h: &Harness, per_team: usize) -> Game {
    let (game, _, _) = lobby(h, per_team).await;
    h.games.start_game(game.id).await.expect("start game")
}

pub fn current_round(game: &Game) -> &Round {
    game.rounds.last().expect("game has a round")
}

pub fn current_turn(game: &Game) -> &Turn {
    current_round(game)
        .turns
        .last()
        .expect("round has a turn")
}

/// Team whose spymaster holds the current turn.
pub fn clue_team(game: &Game) -> TeamId {
    let spymaster = current_turn(game).spymaster;
    game.team_of(spymaster).expect("spymaster has a team").id
}

/// A teammate of the current spymaster who may guess.
pub fn guesser(game: &Game) -> UserId {
    let spymaster = current_turn(game).spymaster;
    *game
        .team_of(spymaster)
        .expect("spymaster has a team")
        .members
        .iter()
        .find(|m| **m != spymaster)
        .expect("team has a guesser")
}

/// A member of the team that is not giving the current clue.
pub fn opponent(game: &Game) -> UserId {
    let clue_team = clue_team(game);
    game.teams
        .iter()
        .find(|t| t.id != clue_team)
        .and_then(|t| t.members.first().copied())
        .expect("opposing team has a member")
}

pub fn cells_where(round: &Round, pred: impl Fn(&MapCell) -> bool) -> Vec<Coord> {
    round
        .map
        .cells()
        .filter(|(_, cell)| pred(cell))
        .map(|(at, _)| at)
        .collect()
}

pub fn rc(at: Coord) -> (i64, i64) {
    (at.row() as i64, at.col() as i64)
}

/// Give a clue on the current turn as its spymaster.
pub async fn clue(h: &Harness, game: &Game, number: i64) {
    let turn = current_turn(game);
    h.games
        .give_evidence(turn.id, turn.spymaster, "hint", number)
        .await
        .expect("give evidence");
}
