use axum::http::StatusCode;
use sea_orm::DatabaseConnection;

/// Handler for `GET /healthz` (liveness).
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// Handler for `GET /readyz` for services without a database.
pub async fn readyz() -> StatusCode {
    StatusCode::OK
}

/// Readiness for database-backed services: 503 while the pool cannot reach Postgres.
pub async fn db_readiness(db: &DatabaseConnection) -> StatusCode {
    match db.ping().await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "database ping failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
