use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::security_config::SecurityConfig;
use crate::repos::GameStore;
use crate::services::GameFlowService;

/// Shared resources handed to every request handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn GameStore>,
    pub games: Arc<GameFlowService>,
    /// Present when the store is database-backed; used by the health check.
    pub db: Option<DatabaseConnection>,
    pub security: SecurityConfig,
}

impl AppState {
    pub fn new(
        games: Arc<GameFlowService>,
        db: Option<DatabaseConnection>,
        security: SecurityConfig,
    ) -> Self {
        Self {
            store: Arc::clone(games.store()),
            games,
            db,
            security,
        }
    }
}
