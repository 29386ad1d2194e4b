mod common;

use codenames_backend::domain::{GuessResult, MapCell, RoundStatus, TurnStatus};
use codenames_backend::errors::domain::{
    ConflictKind, DomainError, ForbiddenKind, ValidationKind,
};
use codenames_backend::realtime::game_topic;
use common::{
    cells_where, clue, clue_team, current_round, current_turn, guesser, harness, lobby, opponent,
    rc, register, started,
};

#[tokio::test]
async fn spymaster_opens_turn_with_a_clue() {
    let h = harness(11);
    let game = started(&h, 2).await;
    let turn = current_turn(&game);

    let saved = h
        .games
        .give_evidence(turn.id, turn.spymaster, "  fruit ", 2)
        .await
        .unwrap();

    assert_eq!(saved.status, TurnStatus::InProgress);
    let clue = saved.clue.unwrap();
    assert_eq!(clue.word, "fruit");
    assert_eq!(clue.number, 2);
}

#[tokio::test]
async fn evidence_rules() {
    let h = harness(12);
    let game = started(&h, 2).await;
    let turn = current_turn(&game);

    let err = h
        .games
        .give_evidence(turn.id, guesser(&game), "fruit", 1)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::NotSpymaster, _)
    ));

    for (word, number) in [("two words", 1), ("", 1), ("fruit", -1), ("fruit", 26)] {
        let err = h
            .games
            .give_evidence(turn.id, turn.spymaster, word, number)
            .await
            .unwrap_err();
        assert!(
            matches!(err, DomainError::Validation(ValidationKind::InvalidClue, _)),
            "{word:?} {number}: {err:?}"
        );
    }

    h.games
        .give_evidence(turn.id, turn.spymaster, "fruit", 0)
        .await
        .unwrap();
    let err = h
        .games
        .give_evidence(turn.id, turn.spymaster, "again", 1)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::EvidenceAlreadyGiven, _)
    ));
}

#[tokio::test]
async fn guesses_are_capped_at_clue_number_plus_one() {
    let h = harness(13);
    let game = started(&h, 2).await;
    clue(&h, &game, 2).await;
    let turn = current_turn(&game).id;
    let who = guesser(&game);
    let neutral = cells_where(current_round(&game), |c| *c == MapCell::Neutral);

    for at in &neutral[..3] {
        let (row, col) = rc(*at);
        let report = h.games.guess(turn, who, row, col).await.unwrap();
        assert_eq!(report.guess.result, GuessResult::Continue);
        assert_eq!(report.guess.cell, MapCell::Neutral);
    }

    let (row, col) = rc(neutral[3]);
    let err = h.games.guess(turn, who, row, col).await.unwrap_err();
    assert!(matches!(
        err,
        DomainError::Conflict(ConflictKind::GuessQuotaReached, _)
    ));
}

#[tokio::test]
async fn guessed_cell_is_claimed_by_guessing_team() {
    let h = harness(14);
    let game = started(&h, 2).await;
    clue(&h, &game, 1).await;
    let team = clue_team(&game);
    let at = cells_where(current_round(&game), |c| *c == MapCell::Neutral)[0];
    let (row, col) = rc(at);

    let report = h
        .games
        .guess(current_turn(&game).id, guesser(&game), row, col)
        .await
        .unwrap();

    let round = current_round(&report.game);
    assert_eq!(*round.progress.get(at), Some(team));
    assert!(*current_turn(&report.game).pointed.get(at));
}

#[tokio::test]
async fn same_cell_twice_in_a_turn_is_rejected() {
    let h = harness(15);
    let game = started(&h, 2).await;
    clue(&h, &game, 3).await;
    let turn = current_turn(&game).id;
    let who = guesser(&game);
    let (row, col) = rc(cells_where(current_round(&game), |c| *c == MapCell::Neutral)[0]);

    h.games.guess(turn, who, row, col).await.unwrap();
    let err = h.games.guess(turn, who, row, col).await.unwrap_err();

    assert!(matches!(
        err,
        DomainError::Conflict(ConflictKind::CellAlreadyGuessed, _)
    ));
}

#[tokio::test]
async fn bomb_ends_round_for_the_opponent() {
    let h = harness(16);
    let game = started(&h, 2).await;
    clue(&h, &game, 2).await;
    let team = clue_team(&game);
    let other = game.opponent_of(team).unwrap();
    let bomb = cells_where(current_round(&game), |c| *c == MapCell::Bomb);
    assert_eq!(bomb.len(), 1);
    let (row, col) = rc(bomb[0]);

    let report = h
        .games
        .guess(current_turn(&game).id, guesser(&game), row, col)
        .await
        .unwrap();

    assert_eq!(report.guess.result, GuessResult::BombHit { winner: other });
    let first = &report.game.rounds[0];
    assert_eq!(first.status, RoundStatus::Finished);
    assert_eq!(first.winner, Some(other));
    assert_eq!(first.turns.last().unwrap().status, TurnStatus::Finished);
    // Two players per team means a second round is dealt in the same save
    assert_eq!(report.game.rounds.len(), 2);
    assert_eq!(report.game.rounds[1].status, RoundStatus::InProgress);
}

#[tokio::test]
async fn only_the_clue_team_may_guess() {
    let h = harness(17);
    let game = started(&h, 2).await;
    clue(&h, &game, 1).await;
    let turn = current_turn(&game);
    let outsider = register(h.store.as_ref(), "outsider").await;

    for caller in [opponent(&game), outsider.id] {
        let err = h.games.guess(turn.id, caller, 0, 0).await.unwrap_err();
        assert!(
            matches!(err, DomainError::Forbidden(ForbiddenKind::NotOnClueTeam, _)),
            "{err:?}"
        );
    }

    let err = h.games.guess(turn.id, turn.spymaster, 0, 0).await.unwrap_err();
    assert!(matches!(
        err,
        DomainError::Forbidden(ForbiddenKind::SpymasterCannotAct, _)
    ));
}

#[tokio::test]
async fn guess_requires_a_clue_and_an_on_board_cell() {
    let h = harness(18);
    let game = started(&h, 2).await;
    let turn = current_turn(&game).id;
    let who = guesser(&game);

    let err = h.games.guess(turn, who, 0, 0).await.unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::TurnNotInProgress, _)
    ));

    clue(&h, &game, 1).await;
    for (row, col) in [(-1, 0), (0, 5), (7, 7)] {
        let err = h.games.guess(turn, who, row, col).await.unwrap_err();
        assert!(
            matches!(
                err,
                DomainError::Validation(ValidationKind::InvalidCoordinates, _)
            ),
            "({row}, {col}): {err:?}"
        );
    }
}

#[tokio::test]
async fn finishing_a_turn_hands_the_clue_to_the_other_team() {
    let h = harness(19);
    let game = started(&h, 2).await;
    clue(&h, &game, 1).await;
    let first = current_turn(&game).clone();
    let team = clue_team(&game);

    let err = h
        .games
        .finish_turn(first.id, first.spymaster)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Forbidden(ForbiddenKind::SpymasterCannotAct, _)
    ));

    let game = h.games.finish_turn(first.id, guesser(&game)).await.unwrap();

    let round = current_round(&game);
    assert_eq!(round.turns.len(), 2);
    assert_eq!(round.turns[0].status, TurnStatus::Finished);
    let next = &round.turns[1];
    assert_eq!(next.status, TurnStatus::Created);
    assert_eq!(next.index, 1);
    assert_eq!(clue_team(&game), game.opponent_of(team).unwrap());

    let err = h
        .games
        .give_evidence(first.id, first.spymaster, "late", 1)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::TurnFinished, _)
    ));
}

#[tokio::test]
async fn game_topic_receives_turn_events() {
    let h = harness(20);
    let (game, _, _) = lobby(&h, 2).await;
    let mut events = h.registry.subscribe(&game_topic(game.id));

    let game = h.games.start_game(game.id).await.unwrap();
    let started = events.recv().await.unwrap();
    assert_eq!(started["event"], "turn_started");
    assert_eq!(started["turn"], current_turn(&game).id.to_string());

    clue(&h, &game, 1).await;
    let evidence = events.recv().await.unwrap();
    assert_eq!(evidence["event"], "evidence_given");
    assert_eq!(evidence["word"], "hint");
    assert_eq!(evidence["number"], 1);

    let (row, col) = rc(cells_where(current_round(&game), |c| *c == MapCell::Neutral)[0]);
    h.games
        .guess(current_turn(&game).id, guesser(&game), row, col)
        .await
        .unwrap();
    let guessed = events.recv().await.unwrap();
    assert_eq!(guessed["event"], "guess_made");
    assert_eq!(guessed["guess"]["result"], "continue");

    h.games
        .finish_turn(current_turn(&game).id, guesser(&game))
        .await
        .unwrap();
    assert_eq!(events.recv().await.unwrap()["event"], "turn_finished");
    assert_eq!(events.recv().await.unwrap()["event"], "turn_started");
}
