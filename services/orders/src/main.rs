use sea_orm::Database;
use tracing::info;

use nomnom_core::tracing::init_tracing;

use nomnom_orders::config::OrdersConfig;
use nomnom_orders::infra::delivery::HttpDeliveryClient;
use nomnom_orders::router::build_router;
use nomnom_orders::state::AppState;

#[tokio::main]
async fn main() {
    init_tracing();

    let config = OrdersConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let delivery = HttpDeliveryClient::new(reqwest::Client::new(), &config.delivery_service_url);

    let router = build_router(AppState { db, delivery });
    let http_addr = format!("0.0.0.0:{}", config.orders_port);
    let listener = tokio::net::TcpListener::bind(&http_addr)
        .await
        .expect("failed to bind");

    info!("orders service listening on {http_addr}");
    axum::serve(listener, router).await.expect("server error");
}
