use sea_orm::DatabaseConnection;

use crate::infra::db::{DbDeliveryRepository, DbDriverApplicationRepository};
use crate::infra::notification::HttpNotificationClient;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub notifier: HttpNotificationClient,
}

impl AppState {
    pub fn delivery_repo(&self) -> DbDeliveryRepository {
        DbDeliveryRepository {
            db: self.db.clone(),
        }
    }

    pub fn application_repo(&self) -> DbDriverApplicationRepository {
        DbDriverApplicationRepository {
            db: self.db.clone(),
        }
    }
}
