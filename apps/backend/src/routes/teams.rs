use actix_web::web;
use serde::Deserialize;

use super::parse_id;
use crate::domain::{GameView, TeamId};
use crate::error::AppError;
use crate::extractors::{CurrentUser, ValidatedJson};
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct RenameTeamRequest {
    pub name: String,
}

/// POST /api/teams/{team_id}/join
async fn join_team(
    user: CurrentUser,
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<web::Json<GameView>, AppError> {
    let team: TeamId = parse_id(&path, "team")?;
    let game = app_state.games.join_team(team, user.0.id).await?;
    Ok(web::Json(app_state.games.view(&game, user.0.id).await?))
}

/// PUT /api/teams/{team_id}
async fn rename_team(
    user: CurrentUser,
    path: web::Path<String>,
    body: ValidatedJson<RenameTeamRequest>,
    app_state: web::Data<AppState>,
) -> Result<web::Json<GameView>, AppError> {
    let team: TeamId = parse_id(&path, "team")?;
    let game = app_state
        .games
        .rename_team(team, user.0.id, &body.name)
        .await?;
    Ok(web::Json(app_state.games.view(&game, user.0.id).await?))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/{team_id}").route(web::put().to(rename_team)));
    cfg.service(web::resource("/{team_id}/join").route(web::post().to(join_team)));
}
