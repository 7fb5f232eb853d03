/// Delivery service configuration loaded from environment variables.
#[derive(Debug)]
pub struct DeliveryConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// TCP port for the HTTP server (default 3150). Env var: `DELIVERY_PORT`.
    pub delivery_port: u16,
    /// Base URL of the notification service. Env var: `NOTIFICATION_SERVICE_URL`.
    pub notification_service_url: String,
}

impl DeliveryConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            delivery_port: std::env::var("DELIVERY_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3150),
            notification_service_url: std::env::var("NOTIFICATION_SERVICE_URL")
                .unwrap_or_else(|_| "http://notification:3140".to_owned()),
        }
    }
}
