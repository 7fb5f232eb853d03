#![allow(async_fn_in_trait)]

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::types::Session;
use crate::error::SessionServiceError;

/// Repository for login sessions.
pub trait SessionRepository: Send + Sync {
    async fn create(&self, session: &Session) -> Result<(), SessionServiceError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Session>, SessionServiceError>;

    /// Set `revoked_at` if not already set. Returns `false` if the session does not exist.
    async fn revoke(&self, id: Uuid, at: DateTime<Utc>) -> Result<bool, SessionServiceError>;

    /// Revoke every active session of a user. Returns how many were revoked.
    async fn revoke_all_for_user(
        &self,
        user_id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<u64, SessionServiceError>;

    /// Active sessions of a user, newest first.
    async fn list_active_by_user(
        &self,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Vec<Session>, SessionServiceError>;
}
