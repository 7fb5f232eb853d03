use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Auth service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum AuthServiceError {
    #[error("token is required")]
    MissingToken,
    #[error("{0}")]
    InvalidRequest(String),
    #[error("google account has no email")]
    GoogleEmailMissing,
    #[error("profile is missing: {}", .0.join(", "))]
    IncompleteProfile(Vec<&'static str>),
    #[error("invalid google token")]
    InvalidGoogleToken,
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("invalid or expired otp")]
    InvalidOtp,
    #[error("session expired")]
    InvalidSession,
    #[error("session does not belong to this user")]
    SessionMismatch,
    #[error("user not found")]
    UserNotFound,
    #[error("user already exists")]
    UserAlreadyExists,
    #[error("profile already completed")]
    ProfileAlreadyCompleted,
    #[error("too many reset codes")]
    TooManyResetCodes,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl AuthServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingToken => "MISSING_TOKEN",
            Self::InvalidRequest(_) => "INVALID_REQUEST",
            Self::GoogleEmailMissing => "GOOGLE_EMAIL_MISSING",
            Self::IncompleteProfile(_) => "INCOMPLETE_PROFILE",
            Self::InvalidGoogleToken => "INVALID_GOOGLE_TOKEN",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::InvalidOtp => "INVALID_OTP",
            Self::InvalidSession => "INVALID_SESSION",
            Self::SessionMismatch => "SESSION_MISMATCH",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::UserAlreadyExists => "USER_ALREADY_EXISTS",
            Self::ProfileAlreadyCompleted => "PROFILE_ALREADY_COMPLETED",
            Self::TooManyResetCodes => "TOO_MANY_RESET_CODES",
            Self::Internal(_) => "INTERNAL",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingToken
            | Self::InvalidRequest(_)
            | Self::GoogleEmailMissing
            | Self::IncompleteProfile(_) => StatusCode::BAD_REQUEST,
            Self::InvalidGoogleToken
            | Self::InvalidCredentials
            | Self::InvalidOtp
            | Self::InvalidSession => StatusCode::UNAUTHORIZED,
            Self::SessionMismatch => StatusCode::FORBIDDEN,
            Self::UserNotFound => StatusCode::NOT_FOUND,
            Self::UserAlreadyExists | Self::ProfileAlreadyCompleted => StatusCode::CONFLICT,
            Self::TooManyResetCodes => StatusCode::TOO_MANY_REQUESTS,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AuthServiceError {
    fn into_response(self) -> Response {
        let status = self.status();
        // 4xx are already visible in the TraceLayer span; only 500s carry a hidden cause.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %format!("{e:#}"), kind = "INTERNAL", "internal error");
        }
        let mut body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        if let Self::IncompleteProfile(missing) = &self {
            body["missingFields"] = serde_json::json!(missing);
        }
        (status, axum::Json(body)).into_response()
    }
}
