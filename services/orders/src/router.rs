use axum::{
    Router,
    extract::State,
    http::StatusCode,
    routing::{get, post, put},
};
use tower_http::trace::TraceLayer;

use nomnom_core::health::{db_readiness, healthz};
use nomnom_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::handlers::order::{
    apply_discount, cancel_order, create_order, get_order, list_customer_orders,
    update_order_status,
};
use crate::state::AppState;

async fn readyz(State(state): State<AppState>) -> StatusCode {
    db_readiness(&state.db).await
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Orders
        .route("/api/orders", post(create_order))
        .route("/api/orders/customer/{customer_id}", get(list_customer_orders))
        .route("/api/orders/{id}", get(get_order))
        .route("/api/orders/{id}/cancel", post(cancel_order))
        .route("/api/orders/{id}/discount", post(apply_discount))
        .route("/api/orders/{id}/status", put(update_order_status))
        .with_state(state)
        .layer(propagate_request_id_layer())
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
}
