use tracing::info;

use nomnom_core::tracing::init_tracing;

use nomnom_notification::config::NotificationConfig;
use nomnom_notification::infra::email::EmailSender;
use nomnom_notification::infra::sms::SmsSender;
use nomnom_notification::router::build_router;
use nomnom_notification::state::AppState;

#[tokio::main]
async fn main() {
    init_tracing();

    let config = NotificationConfig::from_env();
    if config.twilio.is_none() {
        info!("twilio not configured, sms will be logged");
    }
    if config.sendgrid.is_none() {
        info!("sendgrid not configured, email will be logged");
    }

    let client = reqwest::Client::new();
    let state = AppState::new(
        SmsSender::new(client.clone(), config.twilio),
        EmailSender::new(client, config.sendgrid),
    );

    let router = build_router(state);
    let http_addr = format!("0.0.0.0:{}", config.notification_port);
    let listener = tokio::net::TcpListener::bind(&http_addr)
        .await
        .expect("failed to bind");

    info!("notification service listening on {http_addr}");
    axum::serve(listener, router).await.expect("server error");
}
