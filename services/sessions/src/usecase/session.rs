use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use uuid::Uuid;

use nomnom_auth_types::cookie::SESSION_TTL_SECS;
use nomnom_auth_types::token::{SessionClaims, validate_session_token};
use nomnom_domain::user::UserType;

use crate::domain::repository::SessionRepository;
use crate::domain::types::{IssuedSession, MAX_DEVICE_LEN, Session, UNKNOWN_DEVICE};
use crate::error::SessionServiceError;

pub fn issue_session_token(session: &Session, secret: &str) -> Result<String, SessionServiceError> {
    let claims = SessionClaims {
        sub: session.user_id.to_string(),
        sid: session.id.to_string(),
        user_type: session.user_type,
        exp: session.expires_at.timestamp().max(0) as u64,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| SessionServiceError::Internal(e.into()))
}

fn clean_device(device: &str) -> String {
    let device = device.trim();
    if device.is_empty() {
        return UNKNOWN_DEVICE.to_owned();
    }
    device.chars().take(MAX_DEVICE_LEN).collect()
}

// ── CreateSession ────────────────────────────────────────────────────────────

pub struct CreateSessionInput {
    pub user_id: String,
    pub user_type: String,
    pub ip_address: String,
    pub device: String,
}

pub struct CreateSessionUseCase<R: SessionRepository> {
    pub repo: R,
    pub jwt_secret: String,
}

impl<R: SessionRepository> CreateSessionUseCase<R> {
    pub async fn execute(
        &self,
        input: CreateSessionInput,
    ) -> Result<IssuedSession, SessionServiceError> {
        let user_id = input
            .user_id
            .parse::<Uuid>()
            .map_err(|_| SessionServiceError::InvalidUserId)?;
        let user_type = input
            .user_type
            .parse::<UserType>()
            .map_err(|_| SessionServiceError::InvalidUserType)?;

        let now = Utc::now();
        let session = Session {
            id: Uuid::now_v7(),
            user_id,
            user_type,
            ip_address: input.ip_address.trim().to_owned(),
            device: clean_device(&input.device),
            created_at: now,
            expires_at: now + Duration::seconds(SESSION_TTL_SECS as i64),
            revoked_at: None,
        };

        let token = issue_session_token(&session, &self.jwt_secret)?;
        self.repo.create(&session).await?;

        tracing::info!(
            user_id = %session.user_id,
            session_id = %session.id,
            user_type = %session.user_type,
            "session created"
        );
        Ok(IssuedSession { session, token })
    }
}

// ── ValidateSession ──────────────────────────────────────────────────────────

pub struct ValidateSessionUseCase<R: SessionRepository> {
    pub repo: R,
    pub jwt_secret: String,
}

impl<R: SessionRepository> ValidateSessionUseCase<R> {
    /// Signature and expiry come from the JWT; revocation from the stored row.
    pub async fn execute(&self, token: &str) -> Result<Session, SessionServiceError> {
        let info = validate_session_token(token, &self.jwt_secret)
            .map_err(|_| SessionServiceError::InvalidToken)?;

        let session = self
            .repo
            .find_by_id(info.session_id)
            .await?
            .ok_or(SessionServiceError::InvalidToken)?;

        if session.user_id != info.user_id || !session.is_active_at(Utc::now()) {
            return Err(SessionServiceError::InvalidToken);
        }
        Ok(session)
    }
}

// ── RevokeSession ────────────────────────────────────────────────────────────

pub struct RevokeSessionUseCase<R: SessionRepository> {
    pub repo: R,
}

impl<R: SessionRepository> RevokeSessionUseCase<R> {
    /// Idempotent: revoking an already revoked session succeeds.
    pub async fn execute(&self, session_id: &str) -> Result<(), SessionServiceError> {
        let id = session_id
            .parse::<Uuid>()
            .map_err(|_| SessionServiceError::InvalidSessionId)?;
        if !self.repo.revoke(id, Utc::now()).await? {
            return Err(SessionServiceError::SessionNotFound);
        }
        tracing::info!(session_id = %id, "session revoked");
        Ok(())
    }
}

// ── RevokeUserSessions ───────────────────────────────────────────────────────

pub struct RevokeUserSessionsUseCase<R: SessionRepository> {
    pub repo: R,
}

impl<R: SessionRepository> RevokeUserSessionsUseCase<R> {
    pub async fn execute(&self, user_id: &str) -> Result<u64, SessionServiceError> {
        let user_id = user_id
            .parse::<Uuid>()
            .map_err(|_| SessionServiceError::InvalidUserId)?;
        let revoked = self.repo.revoke_all_for_user(user_id, Utc::now()).await?;
        tracing::info!(user_id = %user_id, revoked, "user sessions revoked");
        Ok(revoked)
    }
}

// ── ListUserSessions ─────────────────────────────────────────────────────────

pub struct ListUserSessionsUseCase<R: SessionRepository> {
    pub repo: R,
}

impl<R: SessionRepository> ListUserSessionsUseCase<R> {
    pub async fn execute(&self, user_id: &str) -> Result<Vec<Session>, SessionServiceError> {
        let user_id = user_id
            .parse::<Uuid>()
            .map_err(|_| SessionServiceError::InvalidUserId)?;
        self.repo.list_active_by_user(user_id, Utc::now()).await
    }
}

/// RFC 3339 (ms) rendering used on the wire.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}
