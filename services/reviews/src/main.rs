use sea_orm::Database;
use tracing::info;

use nomnom_core::tracing::init_tracing;

use nomnom_reviews::config::ReviewsConfig;
use nomnom_reviews::router::build_router;
use nomnom_reviews::state::AppState;

#[tokio::main]
async fn main() {
    init_tracing();

    let config = ReviewsConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let router = build_router(AppState { db });
    let http_addr = format!("0.0.0.0:{}", config.reviews_port);
    let listener = tokio::net::TcpListener::bind(&http_addr)
        .await
        .expect("failed to bind");

    info!("reviews service listening on {http_addr}");
    axum::serve(listener, router).await.expect("server error");
}
