use sea_orm::DatabaseConnection;

use crate::infra::db::DbSessionRepository;

/// Shared state for the HTTP router and the gRPC server.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub jwt_secret: String,
}

impl AppState {
    pub fn session_repo(&self) -> DbSessionRepository {
        DbSessionRepository {
            db: self.db.clone(),
        }
    }
}
