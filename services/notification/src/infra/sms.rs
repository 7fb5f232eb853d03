use anyhow::Context as _;
use reqwest::header::CONTENT_TYPE;

use crate::config::TwilioConfig;

const TWILIO_API_BASE: &str = "https://api.twilio.com/2010-04-01";

/// SMS gateway. Falls back to logging when Twilio is not configured.
pub enum SmsSender {
    Twilio(TwilioSms),
    Log,
}

pub struct TwilioSms {
    client: reqwest::Client,
    config: TwilioConfig,
}

impl SmsSender {
    pub fn new(client: reqwest::Client, config: Option<TwilioConfig>) -> Self {
        match config {
            Some(config) => Self::Twilio(TwilioSms { client, config }),
            None => Self::Log,
        }
    }

    pub async fn send(&self, to: &str, body: &str) -> anyhow::Result<()> {
        match self {
            Self::Twilio(twilio) => twilio.send(to, body).await,
            Self::Log => {
                tracing::info!(to, body, "sms (log sender)");
                Ok(())
            }
        }
    }
}

impl TwilioSms {
    async fn send(&self, to: &str, body: &str) -> anyhow::Result<()> {
        let url = format!(
            "{TWILIO_API_BASE}/Accounts/{}/Messages.json",
            self.config.account_sid
        );
        let form = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("To", to)
            .append_pair("From", &self.config.from_number)
            .append_pair("Body", body)
            .finish();

        let resp = self
            .client
            .post(&url)
            .basic_auth(&self.config.account_sid, Some(&self.config.auth_token))
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(form)
            .send()
            .await
            .context("twilio request")?;

        let status = resp.status();
        if !status.is_success() {
            anyhow::bail!("twilio rejected message: {status}");
        }
        tracing::info!(to, "sms sent");
        Ok(())
    }
}
