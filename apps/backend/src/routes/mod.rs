use actix_web::web;
use uuid::Uuid;

use crate::error::AppError;
use crate::errors::ErrorCode;

pub mod games;
pub mod health;
pub mod teams;
pub mod turns;
pub mod users;

/// Register every route. `main.rs` and the route tests share this.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Health check routes: /health
    cfg.service(web::scope("/health").configure(health::configure_routes));

    // Registration and login: /api/users, /api/login
    cfg.service(web::scope("/api/users").configure(users::configure_routes));
    cfg.service(web::scope("/api/login").configure(users::configure_login));

    // Lobby and game reads: /api/games/**
    cfg.service(web::scope("/api/games").configure(games::configure_routes));

    // Team membership: /api/teams/**
    cfg.service(web::scope("/api/teams").configure(teams::configure_routes));

    // Clue and guess protocol: /api/turns/**
    cfg.service(web::scope("/api/turns").configure(turns::configure_routes));
}

/// Parse a uuid path segment into an entity id.
pub(crate) fn parse_id<T: From<Uuid>>(raw: &str, what: &str) -> Result<T, AppError> {
    Uuid::parse_str(raw)
        .map(T::from)
        .map_err(|_| AppError::bad_request(ErrorCode::BadRequest, format!("Invalid {what} id '{raw}'")))
}
