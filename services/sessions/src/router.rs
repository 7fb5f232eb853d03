use axum::{Router, extract::State, http::StatusCode, routing::get};
use tower_http::trace::TraceLayer;

use nomnom_core::health::{db_readiness, healthz};
use nomnom_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::state::AppState;

async fn readyz(State(state): State<AppState>) -> StatusCode {
    db_readiness(&state.db).await
}

/// HTTP surface of the sessions service: health checks only, the API is gRPC.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .with_state(state)
        .layer(propagate_request_id_layer())
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
}
