/// Sessions service configuration loaded from environment variables.
#[derive(Debug)]
pub struct SessionsConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// HMAC secret for signing session tokens. Env var: `SESSION_JWT_SECRET`.
    pub jwt_secret: String,
    /// HTTP port for health checks (default 3120). Env var: `SESSIONS_PORT`.
    pub sessions_port: u16,
    /// gRPC port (default 50061). Env var: `SESSIONS_GRPC_PORT`.
    pub sessions_grpc_port: u16,
}

impl SessionsConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            jwt_secret: std::env::var("SESSION_JWT_SECRET").expect("SESSION_JWT_SECRET"),
            sessions_port: std::env::var("SESSIONS_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3120),
            sessions_grpc_port: std::env::var("SESSIONS_GRPC_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(50061),
        }
    }
}
