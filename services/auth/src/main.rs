use std::net::SocketAddr;

use sea_orm::Database;
use tracing::info;

use nomnom_core::tracing::init_tracing;

use nomnom_auth::config::AuthConfig;
use nomnom_auth::infra::google::GoogleTokenVerifier;
use nomnom_auth::infra::notification::HttpNotificationClient;
use nomnom_auth::infra::sessions::GrpcSessionPort;
use nomnom_auth::infra::users::HttpProfileClient;
use nomnom_auth::router::build_router;
use nomnom_auth::state::AppState;

#[tokio::main]
async fn main() {
    init_tracing();

    let config = AuthConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let sessions_channel = tonic::transport::Channel::from_shared(config.sessions_grpc_url.clone())
        .expect("invalid SESSIONS_GRPC_URL")
        .connect_lazy();

    let http = reqwest::Client::new();
    let state = AppState {
        db,
        cookie_domain: config.cookie_domain,
        verifier: GoogleTokenVerifier::new(http.clone(), config.google_client_id),
        sessions: GrpcSessionPort::new(sessions_channel),
        profiles: HttpProfileClient::new(http.clone(), &config.users_service_url),
        notifier: HttpNotificationClient::new(http, &config.notification_service_url),
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.auth_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("auth service listening on {addr}");
    axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .expect("server error");
}
