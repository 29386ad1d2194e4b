use std::future::Future;
use std::pin::Pin;

use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest};
use tracing::debug;

use super::auth_token::AuthToken;
use crate::auth::jwt::verify_access_token;
use crate::domain::User;
use crate::error::AppError;
use crate::state::app_state::AppState;

/// Authenticated caller, resolved from the bearer token and the user store.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            let token = AuthToken::from_request(&req, &mut Payload::None).await?;
            let state = req
                .app_data::<web::Data<AppState>>()
                .ok_or_else(|| AppError::internal("AppState not available"))?;

            let claims = verify_access_token(&token.token, &state.security)?;
            let user_id = claims.user_id()?;

            let user = state
                .store
                .find_user(user_id)
                .await?
                .ok_or_else(|| {
                    debug!(user_id = %user_id, "Token subject has no user record");
                    AppError::forbidden_user_not_found()
                })?;
            Ok(CurrentUser(user))
        })
    }
}
