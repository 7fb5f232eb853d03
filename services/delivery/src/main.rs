use sea_orm::Database;
use tracing::info;

use nomnom_core::tracing::init_tracing;

use nomnom_delivery::config::DeliveryConfig;
use nomnom_delivery::infra::notification::HttpNotificationClient;
use nomnom_delivery::router::build_router;
use nomnom_delivery::state::AppState;

#[tokio::main]
async fn main() {
    init_tracing();

    let config = DeliveryConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let notifier =
        HttpNotificationClient::new(reqwest::Client::new(), &config.notification_service_url);

    let router = build_router(AppState { db, notifier });
    let http_addr = format!("0.0.0.0:{}", config.delivery_port);
    let listener = tokio::net::TcpListener::bind(&http_addr)
        .await
        .expect("failed to bind");

    info!("delivery service listening on {http_addr}");
    axum::serve(listener, router).await.expect("server error");
}
