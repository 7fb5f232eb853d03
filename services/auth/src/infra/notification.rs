use anyhow::Context as _;
use serde_json::json;

use crate::domain::repository::NotificationPort;
use crate::error::AuthServiceError;

/// REST client for the notification service.
#[derive(Clone)]
pub struct HttpNotificationClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpNotificationClient {
    pub fn new(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }
}

impl NotificationPort for HttpNotificationClient {
    async fn email(&self, to: &str, subject: &str, text: &str) -> Result<(), AuthServiceError> {
        let resp = self
            .client
            .post(format!("{}/notifications/email", self.base_url))
            .json(&json!({ "email": to, "subject": subject, "text": text }))
            .send()
            .await
            .context("POST /notifications/email")?;
        let status = resp.status();
        if !status.is_success() {
            return Err(anyhow::anyhow!("POST /notifications/email returned {status}").into());
        }
        Ok(())
    }
}
