use axum::{
    Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use nomnom_core::health::{db_readiness, healthz};
use nomnom_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::handlers::{
    google::{complete_profile, google_token, profile_completion},
    local::{sign_in, sign_up},
    password::{forgot_password, reset_password, verify_otp},
    session::{client_ip, current_session, logout},
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
        // Google
        .route("/auth/google/token", post(google_token))
        .route("/auth/google/signin", post(google_token))
        .route("/auth/google/complete-profile", post(complete_profile))
        .route(
            "/auth/profile-completion/{user_id}",
            get(profile_completion),
        )
        // Local accounts
        .route("/auth/sign-up", post(sign_up))
        .route("/auth/sign-in", post(sign_in))
        // Sessions
        .route("/auth/logout", post(logout))
        .route("/auth/session", get(current_session))
        .route("/auth/client-ip", get(client_ip))
        // Password reset
        .route("/auth/forgot-password", post(forgot_password))
        .route("/auth/verify-otp", post(verify_otp))
        .route("/auth/reset-password", post(reset_password))
        .with_state(state)
        .layer(propagate_request_id_layer())
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
}
