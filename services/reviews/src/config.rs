/// Reviews service configuration loaded from environment variables.
#[derive(Debug)]
pub struct ReviewsConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// TCP port for the HTTP server (default 3170). Env var: `REVIEWS_PORT`.
    pub reviews_port: u16,
}

impl ReviewsConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            reviews_port: std::env::var("REVIEWS_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3170),
        }
    }
}
