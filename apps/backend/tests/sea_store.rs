mod common;

use codenames_backend::config::db::StoreConfig;
use codenames_backend::config::game::GameConfig;
use codenames_backend::domain::{GameStatus, MapCell, TurnStatus};
use codenames_backend::errors::domain::{DomainError, ValidationKind};
use codenames_backend::infra::state::build_state;
use codenames_backend::auth::password::PasswordHashing;
use codenames_backend::services::users::{authenticate, register_user, Registration};
use codenames_backend::state::app_state::AppState;
use common::{cells_where, current_round, current_turn, guesser, rc, register, TEST_PASSWORD};

async fn sqlite_state() -> AppState {
    build_state()
        .with_store(StoreConfig::Database {
            url: "sqlite::memory:".into(),
        })
        .with_game_config(GameConfig {
            rng_seed: Some(51),
            ..GameConfig::default()
        })
        .build()
        .await
        .expect("build sqlite state")
}

#[tokio::test]
async fn migrations_seed_the_default_catalog() {
    let state = sqlite_state().await;
    let words = state.store.word_catalog().await.unwrap();
    assert_eq!(words.len(), migration::DEFAULT_WORDS.len());
    assert!(words.iter().all(|w| w.lang == migration::DEFAULT_LANG));
}

#[tokio::test]
async fn duplicate_username_or_email_is_rejected() {
    let state = sqlite_state().await;
    register(state.store.as_ref(), "agent").await;
    let hashing = PasswordHashing::low_cost();

    let err = register_user(
        state.store.as_ref(),
        &hashing,
        Registration {
            username: "agent",
            email: "someone-else@example.test",
            password: TEST_PASSWORD,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::UsernameTaken, _)
    ));

    let err = register_user(
        state.store.as_ref(),
        &hashing,
        Registration {
            username: "double-agent",
            email: "agent@example.test",
            password: TEST_PASSWORD,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::EmailTaken, _)
    ));
}

#[tokio::test]
async fn stored_password_hash_authenticates() {
    let state = sqlite_state().await;
    let user = register(state.store.as_ref(), "mole").await;
    let hashing = PasswordHashing::low_cost();

    let found = authenticate(state.store.as_ref(), &hashing, "mole", TEST_PASSWORD)
        .await
        .unwrap();
    assert_eq!(found, Some(user));
    let wrong = authenticate(state.store.as_ref(), &hashing, "mole", "not-the-password")
        .await
        .unwrap();
    assert_eq!(wrong, None);
}

#[tokio::test]
async fn game_aggregate_round_trips_through_the_database() {
    let state = sqlite_state().await;
    let store = state.store.as_ref();
    let games = &state.games;

    let mut players = Vec::new();
    for name in ["red0", "red1", "blue0", "blue1"] {
        players.push(register(store, name).await.id);
    }
    let game = games.create_game(players[0]).await.unwrap();
    assert_eq!(game.version, 0);
    let [t1, t2] = [game.teams[0].id, game.teams[1].id];
    games.join_team(t1, players[0]).await.unwrap();
    games.join_team(t1, players[1]).await.unwrap();
    games.join_team(t2, players[2]).await.unwrap();
    games.join_team(t2, players[3]).await.unwrap();
    games.rename_team(t2, players[2], "Blue").await.unwrap();

    let available = games.get_available().await.unwrap();
    assert_eq!(available.len(), 1);
    assert_eq!(available[0].teams[1].members, vec![players[2], players[3]]);

    let game = games.start_game(game.id).await.unwrap();
    let turn = current_turn(&game).clone();
    games
        .give_evidence(turn.id, turn.spymaster, "ocean", 1)
        .await
        .unwrap();
    let at = cells_where(current_round(&game), |c| *c == MapCell::Neutral)[0];
    let (row, col) = rc(at);
    let report = games
        .guess(turn.id, guesser(&game), row, col)
        .await
        .unwrap();

    let loaded = games.get_game(game.id).await.unwrap();
    assert_eq!(loaded.status, GameStatus::InProgress);
    assert_eq!(loaded.version, report.game.version);
    assert_eq!(loaded.teams, report.game.teams);
    assert_eq!(loaded.teams[1].name, "Blue");
    assert_eq!(loaded.rounds, report.game.rounds);
    assert_eq!(current_turn(&loaded).status, TurnStatus::InProgress);
    assert!(*current_turn(&loaded).pointed.get(at));
    assert!(games.get_available().await.unwrap().is_empty());

    let turn_game = store.find_game_id_by_turn(turn.id).await.unwrap();
    assert_eq!(turn_game, Some(game.id));
}

#[tokio::test]
async fn stale_version_save_is_an_optimistic_lock_conflict() {
    let state = sqlite_state().await;
    let host = register(state.store.as_ref(), "host").await;
    let game = state.games.create_game(host.id).await.unwrap();

    let id = game.id;
    let stale = game.clone();
    state.store.save_game(game, 0).await.unwrap();
    let err = state.store.save_game(stale, 0).await.unwrap_err();

    assert!(err.is_optimistic_lock(), "{err:?}");
    let stored = state.games.get_game(id).await.unwrap();
    assert_eq!(stored.version, 1);
}
