use crate::domain::repository::SessionPort;
use crate::domain::types::SessionInfo;
use crate::error::AuthServiceError;

// ── CurrentSession ────────────────────────────────────────────────────────────

pub struct CurrentSessionUseCase<S: SessionPort> {
    pub sessions: S,
}

impl<S: SessionPort> CurrentSessionUseCase<S> {
    pub async fn execute(&self, token: &str) -> Result<SessionInfo, AuthServiceError> {
        self.sessions
            .validate(token)
            .await?
            .ok_or(AuthServiceError::InvalidSession)
    }
}

// ── Logout ────────────────────────────────────────────────────────────────────

pub struct LogoutUseCase<S: SessionPort> {
    pub sessions: S,
}

impl<S: SessionPort> LogoutUseCase<S> {
    pub async fn execute(&self, token: &str) -> Result<(), AuthServiceError> {
        let session = self
            .sessions
            .validate(token)
            .await?
            .ok_or(AuthServiceError::InvalidSession)?;
        self.sessions.revoke(session.session_id).await?;
        tracing::info!(user_id = %session.user_id, session_id = %session.session_id, "logged out");
        Ok(())
    }
}
