use std::collections::HashMap;
use std::sync::Arc;

use nomnom_core::error::AppError;

use crate::domain::connection::ConnectionManager;
use crate::domain::frame::ServerFrame;
use crate::domain::template::render;
use crate::infra::email::EmailSender;
use crate::infra::sms::SmsSender;

fn required<'a>(value: &'a str, field: &str) -> Result<&'a str, AppError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::BadRequest(format!("{field} is required")));
    }
    Ok(value)
}

// ── Push ─────────────────────────────────────────────────────────────────────

pub struct PushUseCase {
    pub connections: Arc<dyn ConnectionManager>,
}

impl PushUseCase {
    /// Returns whether the user had a live connection to receive it.
    pub fn execute(
        &self,
        user_id: &str,
        event: String,
        payload: serde_json::Value,
    ) -> Result<bool, AppError> {
        let user_id = required(user_id, "userId")?;
        let frame = ServerFrame::Notification { event, payload };
        let delivered = self.connections.send(user_id, frame.to_text());
        tracing::debug!(user_id, delivered, "push");
        Ok(delivered)
    }
}

// ── SendSms ──────────────────────────────────────────────────────────────────

pub struct SendSmsUseCase {
    pub sms: Arc<SmsSender>,
}

impl SendSmsUseCase {
    pub async fn execute(&self, phone_number: &str, message: &str) -> Result<(), AppError> {
        let phone_number = required(phone_number, "phoneNumber")?;
        let message = required(message, "message")?;
        self.sms.send(phone_number, message).await?;
        Ok(())
    }
}

// ── SendEmail ────────────────────────────────────────────────────────────────

pub struct SendEmailUseCase {
    pub email: Arc<EmailSender>,
}

impl SendEmailUseCase {
    pub async fn execute(&self, to: &str, subject: &str, text: &str) -> Result<(), AppError> {
        let to = required(to, "email")?;
        self.email.send(to, subject, text).await?;
        Ok(())
    }
}

// ── BroadcastEmails ──────────────────────────────────────────────────────────

pub struct Recipient {
    pub email: String,
    pub variables: HashMap<String, String>,
}

pub struct BroadcastInput {
    pub subject: String,
    pub template: String,
    pub recipients: Vec<Recipient>,
}

#[derive(Debug, Default)]
pub struct BroadcastReport {
    pub sent: usize,
    pub failed: Vec<String>,
}

pub struct BroadcastEmailsUseCase {
    pub email: Arc<EmailSender>,
}

impl BroadcastEmailsUseCase {
    /// One failed recipient does not stop the rest.
    pub async fn execute(&self, input: BroadcastInput) -> Result<BroadcastReport, AppError> {
        if input.recipients.is_empty() {
            return Err(AppError::BadRequest(
                "recipients must not be empty".to_owned(),
            ));
        }

        let mut report = BroadcastReport::default();
        for recipient in input.recipients {
            let subject = render(&input.subject, &recipient.variables);
            let text = render(&input.template, &recipient.variables);
            let result = match recipient.email.trim() {
                "" => Err(anyhow::anyhow!("blank address")),
                to => self.email.send(to, &subject, &text).await,
            };
            match result {
                Ok(()) => report.sent += 1,
                Err(e) => {
                    tracing::warn!(email = %recipient.email, error = %e, "broadcast email failed");
                    report.failed.push(recipient.email);
                }
            }
        }
        tracing::info!(sent = report.sent, failed = report.failed.len(), "broadcast finished");
        Ok(report)
    }
}
