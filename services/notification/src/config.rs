/// Notification service configuration loaded from environment variables.
#[derive(Debug)]
pub struct NotificationConfig {
    /// TCP port for the HTTP + WebSocket server (default 3140). Env var: `NOTIFICATION_PORT`.
    pub notification_port: u16,
    pub twilio: Option<TwilioConfig>,
    pub sendgrid: Option<SendGridConfig>,
}

#[derive(Debug, Clone)]
pub struct TwilioConfig {
    pub account_sid: String,
    pub auth_token: String,
    pub from_number: String,
}

#[derive(Debug, Clone)]
pub struct SendGridConfig {
    pub api_key: String,
    pub from: String,
}

fn non_empty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

impl NotificationConfig {
    pub fn from_env() -> Self {
        let twilio = match (
            non_empty("TWILIO_ACCOUNT_SID"),
            non_empty("TWILIO_AUTH_TOKEN"),
            non_empty("TWILIO_FROM_NUMBER"),
        ) {
            (Some(account_sid), Some(auth_token), Some(from_number)) => Some(TwilioConfig {
                account_sid,
                auth_token,
                from_number,
            }),
            _ => None,
        };
        let sendgrid = match (non_empty("SENDGRID_API_KEY"), non_empty("EMAIL_FROM")) {
            (Some(api_key), Some(from)) => Some(SendGridConfig { api_key, from }),
            _ => None,
        };
        Self {
            notification_port: std::env::var("NOTIFICATION_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3140),
            twilio,
            sendgrid,
        }
    }
}
