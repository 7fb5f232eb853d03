#![allow(async_fn_in_trait)]

use chrono::{DateTime, Utc};
use uuid::Uuid;

use nomnom_domain::profile::ProfileFields;
use nomnom_domain::user::UserType;

use crate::domain::types::{
    AuthUser, ClientMeta, GoogleIdentity, IssuedSession, ProfileSnapshot, ResetCode, SessionInfo,
};
use crate::error::AuthServiceError;

/// Identity records owned by this service.
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<AuthUser>, AuthServiceError>;

    /// `email` must already be normalised.
    async fn find_by_email(&self, email: &str) -> Result<Option<AuthUser>, AuthServiceError>;

    async fn find_by_google_id(
        &self,
        google_id: &str,
    ) -> Result<Option<AuthUser>, AuthServiceError>;

    /// Insert a new record. A duplicate email or Google id yields
    /// `AuthServiceError::UserAlreadyExists`.
    async fn create(&self, user: &AuthUser) -> Result<(), AuthServiceError>;

    /// Attach a Google id to an existing record and mark it as a Google account.
    async fn link_google(
        &self,
        id: Uuid,
        google_id: &str,
        at: DateTime<Utc>,
    ) -> Result<(), AuthServiceError>;

    async fn complete_profile(
        &self,
        id: Uuid,
        user_type: UserType,
        at: DateTime<Utc>,
    ) -> Result<(), AuthServiceError>;

    async fn set_password_hash(
        &self,
        id: Uuid,
        password_hash: &str,
        at: DateTime<Utc>,
    ) -> Result<(), AuthServiceError>;
}

/// Repository for password-reset codes.
pub trait ResetCodeRepository: Send + Sync {
    /// Count active (unused and unexpired) codes for a user, burnt ones included.
    async fn count_active(&self, user_id: Uuid) -> Result<u64, AuthServiceError>;

    async fn create(&self, code: &ResetCode) -> Result<(), AuthServiceError>;

    /// Find a valid (unused, unexpired, not burnt) code by user + code string.
    async fn find_valid(
        &self,
        user_id: Uuid,
        code: &str,
    ) -> Result<Option<ResetCode>, AuthServiceError>;

    /// Mark a code as used. Returns `false` if it was already consumed.
    async fn mark_used(&self, id: Uuid) -> Result<bool, AuthServiceError>;

    /// Count a wrong guess against every unused, unexpired code of the user.
    async fn record_miss(&self, user_id: Uuid) -> Result<(), AuthServiceError>;
}

/// Verifies a Google access or ID token.
pub trait TokenVerifier: Send + Sync {
    /// Any rejection by Google maps to `AuthServiceError::InvalidGoogleToken`.
    async fn verify(&self, token: &str) -> Result<GoogleIdentity, AuthServiceError>;
}

/// Port to the sessions service.
pub trait SessionPort: Send + Sync {
    async fn create(
        &self,
        user_id: Uuid,
        user_type: UserType,
        meta: &ClientMeta,
    ) -> Result<IssuedSession, AuthServiceError>;

    /// `Ok(None)` when the token is malformed, expired, revoked or unknown.
    async fn validate(&self, token: &str) -> Result<Option<SessionInfo>, AuthServiceError>;

    async fn revoke(&self, session_id: Uuid) -> Result<(), AuthServiceError>;

    /// Returns the number of sessions revoked.
    async fn revoke_user_sessions(&self, user_id: Uuid) -> Result<u64, AuthServiceError>;
}

/// Port to the users service (profile store).
pub trait ProfilePort: Send + Sync {
    async fn find(&self, user_id: Uuid) -> Result<Option<ProfileSnapshot>, AuthServiceError>;

    async fn upsert(
        &self,
        user_id: Uuid,
        email: &str,
        user_type: UserType,
        fields: &ProfileFields,
    ) -> Result<(), AuthServiceError>;
}

/// Port to the notification service.
pub trait NotificationPort: Send + Sync {
    async fn email(&self, to: &str, subject: &str, text: &str) -> Result<(), AuthServiceError>;
}
