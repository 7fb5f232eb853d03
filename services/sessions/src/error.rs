use tonic::Status;

/// Sessions service error variants.
#[derive(Debug, thiserror::Error)]
pub enum SessionServiceError {
    #[error("invalid user id")]
    InvalidUserId,
    #[error("invalid user type")]
    InvalidUserType,
    #[error("invalid session id")]
    InvalidSessionId,
    #[error("invalid session token")]
    InvalidToken,
    #[error("session not found")]
    SessionNotFound,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl SessionServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidUserId => "INVALID_USER_ID",
            Self::InvalidUserType => "INVALID_USER_TYPE",
            Self::InvalidSessionId => "INVALID_SESSION_ID",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::SessionNotFound => "SESSION_NOT_FOUND",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl From<SessionServiceError> for Status {
    fn from(err: SessionServiceError) -> Self {
        let message = format!("{}: {}", err.kind(), err);
        match err {
            SessionServiceError::InvalidUserId
            | SessionServiceError::InvalidUserType
            | SessionServiceError::InvalidSessionId => Status::invalid_argument(message),
            SessionServiceError::InvalidToken => Status::unauthenticated(message),
            SessionServiceError::SessionNotFound => Status::not_found(message),
            SessionServiceError::Internal(ref e) => {
                tracing::error!(error = %e, kind = "INTERNAL", "internal error");
                Status::internal(message)
            }
        }
    }
}
