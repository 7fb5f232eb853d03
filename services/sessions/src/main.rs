use sea_orm::Database;
use tracing::info;

use nomnom_core::tracing::init_tracing;
use nomnom_proto::session::session_service_server::SessionServiceServer;

use nomnom_sessions::config::SessionsConfig;
use nomnom_sessions::grpc_server::SessionsGrpcServer;
use nomnom_sessions::router::build_router;
use nomnom_sessions::state::AppState;

#[tokio::main]
async fn main() {
    init_tracing();

    let config = SessionsConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let state = AppState {
        db,
        jwt_secret: config.jwt_secret,
    };

    let grpc_state = state.clone();
    let grpc_addr = format!("0.0.0.0:{}", config.sessions_grpc_port);
    tokio::spawn(async move {
        let server = SessionsGrpcServer { state: grpc_state };
        info!("sessions gRPC server listening on {grpc_addr}");
        tonic::transport::Server::builder()
            .add_service(SessionServiceServer::new(server))
            .serve(grpc_addr.parse().expect("invalid gRPC address"))
            .await
            .expect("gRPC server error");
    });

    let router = build_router(state);
    let http_addr = format!("0.0.0.0:{}", config.sessions_port);
    let listener = tokio::net::TcpListener::bind(&http_addr)
        .await
        .expect("failed to bind");

    info!("sessions service listening on {http_addr}");
    axum::serve(listener, router).await.expect("server error");
}
