use chrono::{Duration, Utc};
use rand::RngExt;
use uuid::Uuid;

use nomnom_domain::user::normalize_email;

use crate::domain::password::hash_password;
use crate::domain::repository::{
    NotificationPort, ResetCodeRepository, SessionPort, UserRepository,
};
use crate::domain::types::{
    AuthUser, MAX_ACTIVE_RESET_CODES, RESET_CODE_LEN, RESET_CODE_TTL_SECS, ResetCode,
};
use crate::error::AuthServiceError;
use crate::usecase::local::validate_password;

const RESET_EMAIL_SUBJECT: &str = "Your NomNom password reset code";

fn generate_code() -> String {
    let mut rng = rand::rng();
    (0..RESET_CODE_LEN)
        .map(|_| char::from(b'0' + rng.random_range(0..10u8)))
        .collect()
}

// ── ForgotPassword ────────────────────────────────────────────────────────────

pub struct ForgotPasswordUseCase<U, R, N>
where
    U: UserRepository,
    R: ResetCodeRepository,
    N: NotificationPort,
{
    pub users: U,
    pub reset_codes: R,
    pub notifier: N,
}

impl<U, R, N> ForgotPasswordUseCase<U, R, N>
where
    U: UserRepository,
    R: ResetCodeRepository,
    N: NotificationPort,
{
    pub async fn execute(&self, email: &str) -> Result<(), AuthServiceError> {
        let user = self
            .users
            .find_by_email(&normalize_email(email))
            .await?
            .ok_or(AuthServiceError::UserNotFound)?;

        let active = self.reset_codes.count_active(user.id).await?;
        if active >= MAX_ACTIVE_RESET_CODES {
            return Err(AuthServiceError::TooManyResetCodes);
        }

        let now = Utc::now();
        let code = ResetCode {
            id: Uuid::new_v4(),
            user_id: user.id,
            code: generate_code(),
            expires_at: now + Duration::seconds(RESET_CODE_TTL_SECS),
            used_at: None,
            attempts: 0,
            created_at: now,
        };
        self.reset_codes.create(&code).await?;

        let text = format!(
            "Your password reset code is {}. It expires in {} minutes.",
            code.code,
            RESET_CODE_TTL_SECS / 60
        );
        if let Err(e) = self
            .notifier
            .email(&user.email, RESET_EMAIL_SUBJECT, &text)
            .await
        {
            tracing::warn!(user_id = %user.id, error = %e, "reset code email failed");
        }
        Ok(())
    }
}

/// Resolve the user and a live code, or `InvalidOtp` for either miss.
/// A wrong code for a known user counts against all of that user's live codes.
async fn find_code<U, R>(
    users: &U,
    reset_codes: &R,
    email: &str,
    otp: &str,
) -> Result<(AuthUser, ResetCode), AuthServiceError>
where
    U: UserRepository,
    R: ResetCodeRepository,
{
    let user = users
        .find_by_email(&normalize_email(email))
        .await?
        .ok_or(AuthServiceError::InvalidOtp)?;
    match reset_codes.find_valid(user.id, otp.trim()).await? {
        Some(code) => Ok((user, code)),
        None => {
            reset_codes.record_miss(user.id).await?;
            tracing::info!(user_id = %user.id, "wrong reset code");
            Err(AuthServiceError::InvalidOtp)
        }
    }
}

// ── VerifyOtp ─────────────────────────────────────────────────────────────────

pub struct VerifyOtpUseCase<U, R>
where
    U: UserRepository,
    R: ResetCodeRepository,
{
    pub users: U,
    pub reset_codes: R,
}

impl<U, R> VerifyOtpUseCase<U, R>
where
    U: UserRepository,
    R: ResetCodeRepository,
{
    /// Checks the code without consuming it.
    pub async fn execute(&self, email: &str, otp: &str) -> Result<(), AuthServiceError> {
        find_code(&self.users, &self.reset_codes, email, otp).await?;
        Ok(())
    }
}

// ── ResetPassword ─────────────────────────────────────────────────────────────

pub struct ResetPasswordInput {
    pub email: String,
    pub otp: String,
    pub new_password: String,
}

pub struct ResetPasswordUseCase<U, R, S>
where
    U: UserRepository,
    R: ResetCodeRepository,
    S: SessionPort,
{
    pub users: U,
    pub reset_codes: R,
    pub sessions: S,
}

impl<U, R, S> ResetPasswordUseCase<U, R, S>
where
    U: UserRepository,
    R: ResetCodeRepository,
    S: SessionPort,
{
    pub async fn execute(&self, input: ResetPasswordInput) -> Result<(), AuthServiceError> {
        validate_password(&input.new_password)?;
        let (user, code) =
            find_code(&self.users, &self.reset_codes, &input.email, &input.otp).await?;

        if !self.reset_codes.mark_used(code.id).await? {
            return Err(AuthServiceError::InvalidOtp);
        }

        let password_hash = hash_password(&input.new_password)?;
        self.users
            .set_password_hash(user.id, &password_hash, Utc::now())
            .await?;

        let revoked = self.sessions.revoke_user_sessions(user.id).await?;
        tracing::info!(user_id = %user.id, revoked, "password reset");
        Ok(())
    }
}
