use chrono::{DateTime, Utc};
use uuid::Uuid;

use nomnom_domain::user::UserType;

/// Stored login session.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: Uuid,
    pub user_id: Uuid,
    pub user_type: UserType,
    pub ip_address: String,
    pub device: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub revoked_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.revoked_at.is_none() && self.expires_at > now
    }
}

/// A freshly created session together with its bearer token.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub session: Session,
    pub token: String,
}

/// Device label stored when the client sends none.
pub const UNKNOWN_DEVICE: &str = "unknown";

/// Longest device string kept (user agents can be huge).
pub const MAX_DEVICE_LEN: usize = 255;
