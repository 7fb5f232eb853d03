use chrono::Utc;

use nomnom_domain::user::{UserType, normalize_email};

use crate::domain::password::{hash_password, verify_password};
use crate::domain::repository::{ProfilePort, SessionPort, UserRepository};
use crate::domain::types::{AuthUser, ClientMeta, MIN_PASSWORD_LEN, SignedIn};
use crate::error::AuthServiceError;
use crate::usecase::profile::profile_status;

pub(crate) fn validate_email(email: &str) -> Result<String, AuthServiceError> {
    let email = normalize_email(email);
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(email),
        _ => Err(AuthServiceError::InvalidRequest(
            "a valid email is required".to_owned(),
        )),
    }
}

pub(crate) fn validate_password(password: &str) -> Result<(), AuthServiceError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AuthServiceError::InvalidRequest(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}

// ── SignUp ────────────────────────────────────────────────────────────────────

pub struct SignUpInput {
    pub email: String,
    pub password: String,
    pub user_type: Option<UserType>,
    pub meta: ClientMeta,
}

pub struct SignUpUseCase<U, S>
where
    U: UserRepository,
    S: SessionPort,
{
    pub users: U,
    pub sessions: S,
}

impl<U, S> SignUpUseCase<U, S>
where
    U: UserRepository,
    S: SessionPort,
{
    pub async fn execute(&self, input: SignUpInput) -> Result<SignedIn, AuthServiceError> {
        let email = validate_email(&input.email)?;
        validate_password(&input.password)?;

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AuthServiceError::UserAlreadyExists);
        }

        let password_hash = hash_password(&input.password)?;
        let user = AuthUser::local(
            email,
            password_hash,
            input.user_type.unwrap_or(UserType::Pending),
            Utc::now(),
        );
        self.users.create(&user).await?;

        let session = self
            .sessions
            .create(user.id, user.user_type, &input.meta)
            .await?;

        tracing::info!(user_id = %user.id, user_type = %user.user_type, "local sign-up");
        Ok(SignedIn {
            user,
            session,
            is_new_user: true,
            profile_incomplete: true,
            first_name: None,
            last_name: None,
        })
    }
}

// ── SignIn ────────────────────────────────────────────────────────────────────

pub struct SignInInput {
    pub email: String,
    pub password: String,
    pub meta: ClientMeta,
}

pub struct SignInUseCase<U, S, P>
where
    U: UserRepository,
    S: SessionPort,
    P: ProfilePort,
{
    pub users: U,
    pub sessions: S,
    pub profiles: P,
}

impl<U, S, P> SignInUseCase<U, S, P>
where
    U: UserRepository,
    S: SessionPort,
    P: ProfilePort,
{
    pub async fn execute(&self, input: SignInInput) -> Result<SignedIn, AuthServiceError> {
        let email = normalize_email(&input.email);
        // Unknown email, Google-only account and wrong password look the same to the caller.
        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or(AuthServiceError::InvalidCredentials)?;
        let hash = user
            .password_hash
            .as_deref()
            .ok_or(AuthServiceError::InvalidCredentials)?;
        if !verify_password(&input.password, hash) {
            return Err(AuthServiceError::InvalidCredentials);
        }

        let status = profile_status(&self.profiles, &user).await;
        let session = self
            .sessions
            .create(user.id, user.user_type, &input.meta)
            .await?;

        tracing::info!(user_id = %user.id, "local sign-in");
        Ok(SignedIn {
            profile_incomplete: !user.user_type.is_assigned() || !status.is_complete(),
            user,
            session,
            is_new_user: false,
            first_name: status.first_name,
            last_name: status.last_name,
        })
    }
}
