use sea_orm::DatabaseConnection;

use crate::config::Config;

/// Shared application state passed to all route handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub db: DatabaseConnection,
}
