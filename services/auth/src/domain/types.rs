use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use nomnom_domain::profile::ProfileFields;
use nomnom_domain::user::{AuthProvider, UserType};

/// Identity record as stored by the auth service.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    /// Always normalised (see `nomnom_domain::user::normalize_email`).
    pub email: String,
    pub password_hash: Option<String>,
    pub user_type: UserType,
    pub google_id: Option<String>,
    pub is_google_user: bool,
    pub auth_provider: AuthProvider,
    pub profile_completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AuthUser {
    /// Fresh account created by a first Google sign-in.
    pub fn from_google(email: String, google_id: String, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            email,
            password_hash: None,
            user_type: UserType::Pending,
            google_id: Some(google_id),
            is_google_user: true,
            auth_provider: AuthProvider::Google,
            profile_completed: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Fresh account created by a password sign-up.
    pub fn local(
        email: String,
        password_hash: String,
        user_type: UserType,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            email,
            password_hash: Some(password_hash),
            user_type,
            google_id: None,
            is_google_user: false,
            auth_provider: AuthProvider::Local,
            profile_completed: false,
            created_at: now,
            updated_at: now,
        }
    }
}

/// One-time password-reset code.
#[derive(Debug, Clone)]
pub struct ResetCode {
    pub id: Uuid,
    pub user_id: Uuid,
    pub code: String,
    pub expires_at: DateTime<Utc>,
    pub used_at: Option<DateTime<Utc>>,
    /// Wrong guesses made while this code was live.
    pub attempts: i32,
    pub created_at: DateTime<Utc>,
}

impl ResetCode {
    pub fn is_valid(&self) -> bool {
        self.used_at.is_none()
            && self.expires_at > Utc::now()
            && self.attempts < MAX_OTP_ATTEMPTS
    }
}

/// Maximum number of active (unused, unexpired) reset codes per user.
/// Codes burnt by wrong guesses still occupy a slot until they expire.
pub const MAX_ACTIVE_RESET_CODES: u64 = 5;

/// Wrong guesses after which every live code of the user stops verifying.
pub const MAX_OTP_ATTEMPTS: i32 = 5;

/// Reset code length in digits.
pub const RESET_CODE_LEN: usize = 6;

/// Reset code time-to-live in seconds.
pub const RESET_CODE_TTL_SECS: i64 = 600;

pub const MIN_PASSWORD_LEN: usize = 8;

/// Placeholder address used when neither the body, proxy headers nor the socket give one.
pub const UNKNOWN_IP: &str = "0.0.0.0";

/// Which Google verification endpoint a bearer token belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoogleTokenKind {
    Access,
    Id,
}

impl GoogleTokenKind {
    /// Access tokens are opaque (`ya29.` prefix, no dots); anything else is a JWT ID token.
    pub fn classify(token: &str) -> Self {
        if token.starts_with("ya29.") || !token.contains('.') {
            Self::Access
        } else {
            Self::Id
        }
    }
}

/// Claims extracted from a verified Google token.
#[derive(Debug, Clone, Default)]
pub struct GoogleIdentity {
    pub subject: String,
    pub email: Option<String>,
    pub name: Option<String>,
    pub given_name: Option<String>,
    pub family_name: Option<String>,
    pub picture: Option<String>,
}

impl GoogleIdentity {
    /// `(first, last)` name, preferring the structured claims over the display name.
    pub fn names(&self) -> (Option<String>, Option<String>) {
        let (first, last) = self
            .name
            .as_deref()
            .map(nomnom_domain::profile::split_display_name)
            .unwrap_or_default();
        (
            self.given_name.clone().or(first),
            self.family_name.clone().or(last),
        )
    }
}

/// Where a sign-in came from; stored on the session row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientMeta {
    pub ip_address: String,
    pub device: String,
}

/// Session issued by the sessions service.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub session_id: Uuid,
    pub token: String,
    pub user_type: UserType,
}

/// A validated session as reported by the sessions service.
#[derive(Debug, Clone)]
pub struct SessionInfo {
    pub session_id: Uuid,
    pub user_id: Uuid,
    pub user_type: UserType,
    /// RFC 3339.
    pub expires_at: String,
}

/// Profile as returned by the users service. Extra response fields are ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSnapshot {
    pub user_type: UserType,
    #[serde(flatten)]
    pub fields: ProfileFields,
}

/// Result of any flow that ends with a fresh session.
#[derive(Debug, Clone)]
pub struct SignedIn {
    pub user: AuthUser,
    pub session: IssuedSession,
    pub is_new_user: bool,
    pub profile_incomplete: bool,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}
