use sea_orm::DatabaseConnection;

use crate::infra::db::DbOrderRepository;
use crate::infra::delivery::HttpDeliveryClient;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub delivery: HttpDeliveryClient,
}

impl AppState {
    pub fn order_repo(&self) -> DbOrderRepository {
        DbOrderRepository {
            db: self.db.clone(),
        }
    }
}
