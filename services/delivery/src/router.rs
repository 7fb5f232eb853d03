use axum::{
    Router,
    extract::State,
    http::StatusCode,
    routing::{get, post, put},
};
use tower_http::trace::TraceLayer;

use nomnom_core::health::{db_readiness, healthz};
use nomnom_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::handlers::{
    delivery::{
        allocate_driver, create_delivery, get_delivery, get_order_delivery, list_deliveries,
        list_pending_deliveries, update_delivery_status, update_order_status,
    },
    driver::{apply, decide_application, get_application},
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
        .route("/orders", post(create_delivery))
        .route("/orders/{order_id}/status", put(update_order_status))
        .route("/orders/{order_id}/delivery", get(get_order_delivery))
        // Deliveries
        .route("/deliveries", get(list_deliveries))
        .route("/deliveries/pending", get(list_pending_deliveries))
        .route("/deliveries/{id}", get(get_delivery))
        .route("/deliveries/{id}/status", put(update_delivery_status))
        // Drivers
        .route("/drivers/allocate", post(allocate_driver))
        .route("/drivers/apply", post(apply))
        .route(
            "/drivers/application/{user_id}",
            get(get_application),
        )
        .route(
            "/drivers/application/{user_id}/status",
            put(decide_application),
        )
        .with_state(state)
        .layer(propagate_request_id_layer())
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
}
