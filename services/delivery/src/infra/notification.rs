use anyhow::Context as _;
use serde_json::json;
use uuid::Uuid;

use crate::domain::repository::NotificationPort;
use crate::error::DeliveryServiceError;

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

    async fn post(&self, path: &str, body: serde_json::Value) -> Result<(), DeliveryServiceError> {
        let url = format!("{}{path}", self.base_url);
        let resp = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .with_context(|| format!("POST {path}"))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(anyhow::anyhow!("POST {path} returned {status}").into());
        }
        Ok(())
    }
}

impl NotificationPort for HttpNotificationClient {
    async fn push(
        &self,
        user_id: Uuid,
        event: &str,
        payload: serde_json::Value,
    ) -> Result<(), DeliveryServiceError> {
        self.post(
            "/notifications/push",
            json!({ "userId": user_id, "event": event, "payload": payload }),
        )
        .await
    }

    async fn sms(&self, phone_number: &str, message: &str) -> Result<(), DeliveryServiceError> {
        self.post(
            "/notifications/sms",
            json!({ "phoneNumber": phone_number, "message": message }),
        )
        .await
    }

    async fn email(
        &self,
        to: &str,
        subject: &str,
        text: &str,
    ) -> Result<(), DeliveryServiceError> {
        self.post(
            "/notifications/email",
            json!({ "email": to, "subject": subject, "text": text }),
        )
        .await
    }
}
