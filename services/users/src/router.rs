use axum::{
    Router,
    extract::State,
    http::StatusCode,
    routing::{get, put},
};
use tower_http::trace::TraceLayer;

use nomnom_core::health::{db_readiness, healthz};
use nomnom_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::handlers::user::{get_me, get_user, get_user_by_email, update_me, upsert_user};
use crate::state::AppState;

async fn readyz(State(state): State<AppState>) -> StatusCode {
    db_readiness(&state.db).await
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Current user (gateway identity)
        .route("/users/@me", get(get_me).patch(update_me))
        // Profiles by id / email
        .route("/users/email/{email}", get(get_user_by_email))
        .route("/users/{id}", put(upsert_user).get(get_user))
        .with_state(state)
        .layer(propagate_request_id_layer())
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
}
