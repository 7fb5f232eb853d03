use sea_orm::DatabaseConnection;

use crate::infra::db::{DbResetCodeRepository, DbUserRepository};
use crate::infra::google::GoogleTokenVerifier;
use crate::infra::notification::HttpNotificationClient;
use crate::infra::sessions::GrpcSessionPort;
use crate::infra::users::HttpProfileClient;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub cookie_domain: String,
    pub verifier: GoogleTokenVerifier,
    pub sessions: GrpcSessionPort,
    pub profiles: HttpProfileClient,
    pub notifier: HttpNotificationClient,
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn reset_code_repo(&self) -> DbResetCodeRepository {
        DbResetCodeRepository {
            db: self.db.clone(),
        }
    }
}
