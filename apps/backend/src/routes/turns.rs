//! Clue, guess and end-of-turn routes.

use actix_web::web;
use serde::{Deserialize, Serialize};

use super::parse_id;
use crate::domain::{Coord, GameView, GuessOutcome, Turn, TurnId};
use crate::error::AppError;
use crate::errors::domain::DomainError;
use crate::extractors::{CurrentUser, ValidatedJson};
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct EvidenceRequest {
    pub word: String,
    pub number: i64,
}

/// Either `{"row": 1, "col": 3}` or `{"guess": "1,3"}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum GuessRequest {
    Coords { row: i64, col: i64 },
    Pair { guess: String },
}

impl GuessRequest {
    pub fn coords(&self) -> Result<(i64, i64), DomainError> {
        match self {
            GuessRequest::Coords { row, col } => Ok((*row, *col)),
            GuessRequest::Pair { guess } => Coord::parse_pair(guess),
        }
    }
}

#[derive(Debug, Serialize)]
struct GuessResponse {
    guess: GuessOutcome,
    game: GameView,
}

/// PUT /api/turns/{turn_id}/evidence
async fn give_evidence(
    user: CurrentUser,
    path: web::Path<String>,
    body: ValidatedJson<EvidenceRequest>,
    app_state: web::Data<AppState>,
) -> Result<web::Json<Turn>, AppError> {
    let turn: TurnId = parse_id(&path, "turn")?;
    let turn = app_state
        .games
        .give_evidence(turn, user.0.id, &body.word, body.number)
        .await?;
    Ok(web::Json(turn))
}

/// POST /api/turns/{turn_id}/guess
async fn guess(
    user: CurrentUser,
    path: web::Path<String>,
    body: ValidatedJson<GuessRequest>,
    app_state: web::Data<AppState>,
) -> Result<web::Json<GuessResponse>, AppError> {
    let turn: TurnId = parse_id(&path, "turn")?;
    let (row, col) = body.coords()?;
    let report = app_state.games.guess(turn, user.0.id, row, col).await?;
    let game = app_state.games.view(&report.game, user.0.id).await?;
    Ok(web::Json(GuessResponse {
        guess: report.guess,
        game,
    }))
}

/// PUT /api/turns/{turn_id}/finish
async fn finish_turn(
    user: CurrentUser,
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<web::Json<GameView>, AppError> {
    let turn: TurnId = parse_id(&path, "turn")?;
    let game = app_state.games.finish_turn(turn, user.0.id).await?;
    Ok(web::Json(app_state.games.view(&game, user.0.id).await?))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/{turn_id}/evidence").route(web::put().to(give_evidence)));
    cfg.service(web::resource("/{turn_id}/guess").route(web::post().to(guess)));
    cfg.service(web::resource("/{turn_id}/finish").route(web::put().to(finish_turn)));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guess_body_accepts_both_shapes() {
        let coords: GuessRequest = serde_json::from_str(r#"{"row": 2, "col": 4}"#).unwrap();
        assert_eq!(coords.coords().unwrap(), (2, 4));

        let pair: GuessRequest = serde_json::from_str(r#"{"guess": "3,1"}"#).unwrap();
        assert_eq!(pair.coords().unwrap(), (3, 1));

        let bad: GuessRequest = serde_json::from_str(r#"{"guess": "3"}"#).unwrap();
        assert!(bad.coords().is_err());
    }
}
