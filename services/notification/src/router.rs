use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use nomnom_core::health::{healthz, readyz};
use nomnom_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::handlers::{
    notification::{broadcast_emails, connection_status, push, send_email, send_sms},
    ws::ws_upgrade,
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // WebSocket
        .route("/ws", get(ws_upgrade))
        // Notifications
        .route("/notifications/push", post(push))
        .route(
            "/notifications/connections/{user_id}",
            get(connection_status),
        )
        .route("/notifications/sms", post(send_sms))
        .route("/notifications/email", post(send_email))
        .route("/notifications/broadcast-emails", post(broadcast_emails))
        .with_state(state)
        .layer(propagate_request_id_layer())
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
}
