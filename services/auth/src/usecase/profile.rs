use chrono::Utc;
use uuid::Uuid;

use nomnom_domain::profile::{MISSING_PROFILE_DATA, ProfileFields, missing_fields};
use nomnom_domain::user::UserType;

use crate::domain::repository::{ProfilePort, SessionPort, UserRepository};
use crate::domain::types::{AuthUser, ClientMeta, IssuedSession};
use crate::error::AuthServiceError;

/// What the users service knows about an account's profile.
#[derive(Debug, Default)]
pub struct ProfileStatus {
    pub missing_fields: Vec<&'static str>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl ProfileStatus {
    pub fn is_complete(&self) -> bool {
        self.missing_fields.is_empty()
    }
}

/// Best-effort profile check. A failed lookup reports `profile data` as missing
/// instead of failing the caller.
pub async fn profile_status<P: ProfilePort>(profiles: &P, user: &AuthUser) -> ProfileStatus {
    match profiles.find(user.id).await {
        Ok(Some(profile)) => ProfileStatus {
            missing_fields: missing_fields(user.user_type, &profile.fields),
            first_name: profile.fields.first_name,
            last_name: profile.fields.last_name,
        },
        Ok(None) => ProfileStatus {
            missing_fields: missing_fields(user.user_type, &ProfileFields::default()),
            ..Default::default()
        },
        Err(e) => {
            tracing::warn!(user_id = %user.id, error = %e, "profile lookup failed");
            ProfileStatus {
                missing_fields: vec![MISSING_PROFILE_DATA],
                ..Default::default()
            }
        }
    }
}

// ── CompleteProfile ───────────────────────────────────────────────────────────

pub struct CompleteProfileInput {
    /// Token of the session the caller signed in with.
    pub session_token: String,
    pub user_id: Uuid,
    pub user_type: UserType,
    pub fields: ProfileFields,
    pub meta: ClientMeta,
}

#[derive(Debug)]
pub struct CompleteProfileOutput {
    pub user_id: Uuid,
    pub session: IssuedSession,
}

pub struct CompleteProfileUseCase<U, P, S>
where
    U: UserRepository,
    P: ProfilePort,
    S: SessionPort,
{
    pub users: U,
    pub profiles: P,
    pub sessions: S,
}

impl<U, P, S> CompleteProfileUseCase<U, P, S>
where
    U: UserRepository,
    P: ProfilePort,
    S: SessionPort,
{
    pub async fn execute(
        &self,
        input: CompleteProfileInput,
    ) -> Result<CompleteProfileOutput, AuthServiceError> {
        if !input.user_type.is_assigned() {
            return Err(AuthServiceError::InvalidRequest(
                "userType must be CUSTOMER, RESTAURANT or DRIVER".to_owned(),
            ));
        }

        let current = self
            .sessions
            .validate(&input.session_token)
            .await?
            .ok_or(AuthServiceError::InvalidSession)?;
        if current.user_id != input.user_id {
            tracing::warn!(
                session_user_id = %current.user_id,
                user_id = %input.user_id,
                "complete-profile for another user"
            );
            return Err(AuthServiceError::SessionMismatch);
        }

        let user = self
            .users
            .find_by_id(input.user_id)
            .await?
            .ok_or(AuthServiceError::UserNotFound)?;
        if user.profile_completed {
            return Err(AuthServiceError::ProfileAlreadyCompleted);
        }

        // Fields sent earlier still count towards completeness.
        let mut fields = match self.profiles.find(user.id).await {
            Ok(Some(existing)) => existing.fields,
            Ok(None) => ProfileFields::default(),
            Err(e) => {
                tracing::warn!(user_id = %user.id, error = %e, "profile lookup failed");
                ProfileFields::default()
            }
        };
        fields.merge(input.fields);

        let missing = missing_fields(input.user_type, &fields);
        if !missing.is_empty() {
            return Err(AuthServiceError::IncompleteProfile(missing));
        }

        self.profiles
            .upsert(user.id, &user.email, input.user_type, &fields)
            .await?;
        self.users
            .complete_profile(user.id, input.user_type, Utc::now())
            .await?;

        // The previous session still carries the old user type.
        let session = self
            .sessions
            .create(user.id, input.user_type, &input.meta)
            .await?;
        if let Err(e) = self.sessions.revoke(current.session_id).await {
            tracing::warn!(user_id = %user.id, error = %e, "revoking pre-profile session failed");
        }

        tracing::info!(user_id = %user.id, user_type = %input.user_type, "profile completed");
        Ok(CompleteProfileOutput {
            user_id: user.id,
            session,
        })
    }
}

// ── ProfileCompletion ─────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct ProfileCompletion {
    pub is_complete: bool,
    pub user_type: UserType,
    pub email: String,
    pub missing_fields: Vec<&'static str>,
}

pub struct ProfileCompletionUseCase<U, P>
where
    U: UserRepository,
    P: ProfilePort,
{
    pub users: U,
    pub profiles: P,
}

impl<U, P> ProfileCompletionUseCase<U, P>
where
    U: UserRepository,
    P: ProfilePort,
{
    pub async fn execute(&self, user_id: Uuid) -> Result<ProfileCompletion, AuthServiceError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(AuthServiceError::UserNotFound)?;
        let status = profile_status(&self.profiles, &user).await;
        Ok(ProfileCompletion {
            is_complete: status.is_complete(),
            user_type: user.user_type,
            email: user.email,
            missing_fields: status.missing_fields,
        })
    }
}
