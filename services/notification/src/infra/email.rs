use anyhow::Context as _;
use serde_json::json;

use crate::config::SendGridConfig;

const SENDGRID_SEND_URL: &str = "https://api.sendgrid.com/v3/mail/send";

/// Email gateway. Falls back to logging when SendGrid is not configured.
pub enum EmailSender {
    SendGrid(SendGridEmail),
    Log,
}

pub struct SendGridEmail {
    client: reqwest::Client,
    config: SendGridConfig,
}

impl EmailSender {
    pub fn new(client: reqwest::Client, config: Option<SendGridConfig>) -> Self {
        match config {
            Some(config) => Self::SendGrid(SendGridEmail { client, config }),
            None => Self::Log,
        }
    }

    pub async fn send(&self, to: &str, subject: &str, text: &str) -> anyhow::Result<()> {
        match self {
            Self::SendGrid(sendgrid) => sendgrid.send(to, subject, text).await,
            Self::Log => {
                tracing::info!(to, subject, "email (log sender)");
                Ok(())
            }
        }
    }
}

impl SendGridEmail {
    async fn send(&self, to: &str, subject: &str, text: &str) -> anyhow::Result<()> {
        let body = json!({
            "personalizations": [{ "to": [{ "email": to }] }],
            "from": { "email": self.config.from },
            "subject": subject,
            "content": [{ "type": "text/plain", "value": text }],
        });

        let resp = self
            .client
            .post(SENDGRID_SEND_URL)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .context("sendgrid request")?;

        let status = resp.status();
        if !status.is_success() {
            anyhow::bail!("sendgrid rejected email: {status}");
        }
        tracing::info!(to, subject, "email sent");
        Ok(())
    }
}
