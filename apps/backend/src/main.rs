use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use codenames_backend::config::db::{redis_url, StoreConfig};
use codenames_backend::config::game::GameConfig;
use codenames_backend::error::AppError;
use codenames_backend::infra::state::build_state;
use codenames_backend::middleware::request_trace::RequestTrace;
use codenames_backend::realtime::RedisNotifier;
use codenames_backend::routes;
use codenames_backend::state::app_state::AppState;
use codenames_backend::state::security_config::SecurityConfig;
use tracing::{error, info};

mod telemetry;

async fn app_state_from_env() -> Result<AppState, AppError> {
    let mut builder = build_state()
        .with_security(SecurityConfig::from_env()?)
        .with_store(StoreConfig::from_env()?)
        .with_game_config(GameConfig::from_env()?);

    if let Some(url) = redis_url() {
        let notifier = RedisNotifier::connect(&url).await?;
        info!("Publishing lifecycle events to Redis");
        builder = builder.with_notifier(Arc::new(notifier));
    }
    builder.build().await
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment
    let host = std::env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = match std::env::var("BACKEND_PORT")
        .unwrap_or_else(|_| "3001".to_string())
        .parse::<u16>()
    {
        Ok(port) => port,
        Err(_) => {
            error!("BACKEND_PORT must be a valid port number");
            std::process::exit(1);
        }
    };

    let app_state = match app_state_from_env().await {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "Failed to build application state");
            std::process::exit(1);
        }
    };
    info!(
        host = %host,
        port,
        store = if app_state.db.is_some() { "database" } else { "memory" },
        "Starting Codenames backend"
    );

    let data = web::Data::new(app_state);

    HttpServer::new(move || {
        App::new()
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
