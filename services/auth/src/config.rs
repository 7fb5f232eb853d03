/// Auth service configuration loaded from environment variables.
#[derive(Debug)]
pub struct AuthConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// OAuth client id that Google ID tokens must be issued for.
    pub google_client_id: String,
    /// Cookie domain attribute (root domain, e.g. "example.com").
    pub cookie_domain: String,
    /// TCP port to listen on (default 3112). Env var: `AUTH_PORT`.
    pub auth_port: u16,
    /// Sessions service gRPC URL (e.g. "http://sessions:50061"). Env var: `SESSIONS_GRPC_URL`.
    pub sessions_grpc_url: String,
    /// Base URL of the users service. Env var: `USERS_SERVICE_URL`.
    pub users_service_url: String,
    /// Base URL of the notification service. Env var: `NOTIFICATION_SERVICE_URL`.
    pub notification_service_url: String,
}

impl AuthConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            google_client_id: std::env::var("GOOGLE_CLIENT_ID").expect("GOOGLE_CLIENT_ID"),
            cookie_domain: std::env::var("COOKIE_DOMAIN").expect("COOKIE_DOMAIN"),
            auth_port: std::env::var("AUTH_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3112),
            sessions_grpc_url: std::env::var("SESSIONS_GRPC_URL").expect("SESSIONS_GRPC_URL"),
            users_service_url: std::env::var("USERS_SERVICE_URL")
                .unwrap_or_else(|_| "http://users:3113".to_owned()),
            notification_service_url: std::env::var("NOTIFICATION_SERVICE_URL")
                .unwrap_or_else(|_| "http://notification:3140".to_owned()),
        }
    }
}
