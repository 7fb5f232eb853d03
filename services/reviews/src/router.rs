use axum::{Router, extract::State, http::StatusCode, routing::get};
use tower_http::trace::TraceLayer;

use nomnom_core::health::{db_readiness, healthz};
use nomnom_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::handlers::review::{add_review, get_reviews_by_target};
use crate::state::AppState;

async fn readyz(State(state): State<AppState>) -> StatusCode {
    db_readiness(&state.db).await
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Reviews
        .route("/api/reviews", get(get_reviews_by_target).post(add_review))
        .with_state(state)
        .layer(propagate_request_id_layer())
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
}
