use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use crate::error::AuthServiceError;
use crate::state::AppState;
use crate::usecase::password::{
    ForgotPasswordUseCase, ResetPasswordInput, ResetPasswordUseCase, VerifyOtpUseCase,
};

// ── POST /auth/forgot-password ────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

pub async fn forgot_password(
    State(state): State<AppState>,
    Json(body): Json<ForgotPasswordRequest>,
) -> Result<StatusCode, AuthServiceError> {
    let usecase = ForgotPasswordUseCase {
        users: state.user_repo(),
        reset_codes: state.reset_code_repo(),
        notifier: state.notifier.clone(),
    };
    usecase.execute(&body.email).await?;
    Ok(StatusCode::ACCEPTED)
}

// ── POST /auth/verify-otp ─────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct VerifyOtpRequest {
    pub email: String,
    pub otp: String,
}

#[derive(Serialize)]
pub struct VerifyOtpResponse {
    pub valid: bool,
}

pub async fn verify_otp(
    State(state): State<AppState>,
    Json(body): Json<VerifyOtpRequest>,
) -> Result<Json<VerifyOtpResponse>, AuthServiceError> {
    let usecase = VerifyOtpUseCase {
        users: state.user_repo(),
        reset_codes: state.reset_code_repo(),
    };
    usecase.execute(&body.email, &body.otp).await?;
    Ok(Json(VerifyOtpResponse { valid: true }))
}

// ── POST /auth/reset-password ─────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub email: String,
    pub otp: String,
    pub new_password: String,
}

pub async fn reset_password(
    State(state): State<AppState>,
    Json(body): Json<ResetPasswordRequest>,
) -> Result<StatusCode, AuthServiceError> {
    let usecase = ResetPasswordUseCase {
        users: state.user_repo(),
        reset_codes: state.reset_code_repo(),
        sessions: state.sessions.clone(),
    };
    usecase
        .execute(ResetPasswordInput {
            email: body.email,
            otp: body.otp,
            new_password: body.new_password,
        })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
