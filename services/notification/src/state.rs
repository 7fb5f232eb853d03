use std::sync::Arc;

use crate::domain::connection::ConnectionManager;
use crate::infra::email::EmailSender;
use crate::infra::memory::InMemoryConnectionManager;
use crate::infra::sms::SmsSender;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub connections: Arc<dyn ConnectionManager>,
    pub sms: Arc<SmsSender>,
    pub email: Arc<EmailSender>,
}

impl AppState {
    pub fn new(sms: SmsSender, email: EmailSender) -> Self {
        Self {
            connections: Arc::new(InMemoryConnectionManager::new()),
            sms: Arc::new(sms),
            email: Arc::new(email),
        }
    }
}
