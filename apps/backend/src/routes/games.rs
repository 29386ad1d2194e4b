//! Lobby and game read routes.

use actix_web::{web, HttpResponse};

use super::parse_id;
use crate::domain::{GameId, GameView};
use crate::error::AppError;
use crate::extractors::CurrentUser;
use crate::state::app_state::AppState;

/// POST /api/games
async fn create_game(
    user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let game = app_state.games.create_game(user.0.id).await?;
    let view = app_state.games.view(&game, user.0.id).await?;
    Ok(HttpResponse::Created().json(view))
}

/// GET /api/games/available
async fn available(
    user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<web::Json<Vec<GameView>>, AppError> {
    let games = app_state.games.get_available().await?;
    let mut views = Vec::with_capacity(games.len());
    for game in &games {
        views.push(app_state.games.view(game, user.0.id).await?);
    }
    Ok(web::Json(views))
}

/// GET /api/games/{game_id}
async fn get_game(
    user: CurrentUser,
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<web::Json<GameView>, AppError> {
    let id: GameId = parse_id(&path, "game")?;
    let game = app_state.games.get_game(id).await?;
    Ok(web::Json(app_state.games.view(&game, user.0.id).await?))
}

/// POST /api/games/{game_id}/start
async fn start_game(
    user: CurrentUser,
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<web::Json<GameView>, AppError> {
    let id: GameId = parse_id(&path, "game")?;
    let game = app_state.games.start_game(id).await?;
    Ok(web::Json(app_state.games.view(&game, user.0.id).await?))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("").route(web::post().to(create_game)));
    // Registered before `/{game_id}` so it is not parsed as an id
    cfg.service(web::resource("/available").route(web::get().to(available)));
    cfg.service(web::resource("/{game_id}").route(web::get().to(get_game)));
    cfg.service(web::resource("/{game_id}/start").route(web::post().to(start_game)));
}
