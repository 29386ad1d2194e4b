use std::time::SystemTime;

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::auth::jwt::mint_access_token;
use crate::domain::User;
use crate::error::AppError;
use crate::extractors::{CurrentUser, ValidatedJson};
use crate::services::users::{authenticate, register_user, Registration};
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
struct SessionResponse {
    user: User,
    token: String,
}

fn session(user: User, app_state: &AppState) -> Result<SessionResponse, AppError> {
    let token = mint_access_token(&user, SystemTime::now(), &app_state.security)?;
    Ok(SessionResponse { user, token })
}

/// POST /api/users
async fn register(
    body: ValidatedJson<RegisterRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let registration = Registration {
        username: &body.username,
        email: &body.email,
        password: &body.password,
    };
    let user = register_user(
        app_state.store.as_ref(),
        &app_state.security.passwords,
        registration,
    )
    .await?;
    Ok(HttpResponse::Created().json(session(user, &app_state)?))
}

/// POST /api/login
async fn login(
    body: ValidatedJson<LoginRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let user = authenticate(
        app_state.store.as_ref(),
        &app_state.security.passwords,
        &body.username,
        &body.password,
    )
    .await?
    .ok_or_else(AppError::invalid_credentials)?;
    Ok(HttpResponse::Ok().json(session(user, &app_state)?))
}

/// GET /api/users/me
async fn me(user: CurrentUser) -> Result<web::Json<User>, AppError> {
    Ok(web::Json(user.0))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("").route(web::post().to(register)));
    cfg.service(web::resource("/me").route(web::get().to(me)));
}

pub fn configure_login(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("").route(web::post().to(login)));
}
