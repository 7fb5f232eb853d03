/// Orders service configuration loaded from environment variables.
#[derive(Debug)]
pub struct OrdersConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// TCP port for the HTTP server (default 3160). Env var: `ORDERS_PORT`.
    pub orders_port: u16,
    /// Base URL of the delivery service. Env var: `DELIVERY_SERVICE_URL`.
    pub delivery_service_url: String,
}

impl OrdersConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            orders_port: std::env::var("ORDERS_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3160),
            delivery_service_url: std::env::var("DELIVERY_SERVICE_URL")
                .unwrap_or_else(|_| "http://delivery:3150".to_owned()),
        }
    }
}
