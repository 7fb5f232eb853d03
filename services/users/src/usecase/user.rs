use chrono::Utc;
use uuid::Uuid;

use nomnom_domain::profile::ProfileFields;
use nomnom_domain::user::{UserType, normalize_email};

use crate::domain::repository::ProfileRepository;
use crate::domain::types::Profile;
use crate::error::UsersServiceError;

fn checked_email(raw: &str) -> Result<String, UsersServiceError> {
    let email = normalize_email(raw);
    if email.is_empty() || !email.contains('@') {
        return Err(UsersServiceError::InvalidEmail);
    }
    Ok(email)
}

// ── UpsertProfile ────────────────────────────────────────────────────────────

pub struct UpsertProfileInput {
    pub id: Uuid,
    pub email: String,
    pub user_type: UserType,
    pub fields: ProfileFields,
}

pub struct UpsertProfileUseCase<R: ProfileRepository> {
    pub repo: R,
}

impl<R: ProfileRepository> UpsertProfileUseCase<R> {
    /// Fields present in the input overwrite stored ones; absent fields are kept.
    pub async fn execute(&self, input: UpsertProfileInput) -> Result<Profile, UsersServiceError> {
        let email = checked_email(&input.email)?;

        if let Some(owner) = self.repo.find_by_email(&email).await? {
            if owner.id != input.id {
                return Err(UsersServiceError::EmailAlreadyInUse);
            }
        }

        let now = Utc::now();
        let profile = match self.repo.find_by_id(input.id).await? {
            Some(mut existing) => {
                existing.email = email;
                existing.user_type = input.user_type;
                existing.fields.merge(input.fields);
                existing.updated_at = now;
                existing
            }
            None => Profile {
                id: input.id,
                email,
                user_type: input.user_type,
                fields: input.fields,
                created_at: now,
                updated_at: now,
            },
        };

        self.repo.save(&profile).await?;
        tracing::info!(
            user_id = %profile.id,
            user_type = %profile.user_type,
            "profile saved"
        );
        Ok(profile)
    }
}

// ── GetProfile ───────────────────────────────────────────────────────────────

pub struct GetProfileUseCase<R: ProfileRepository> {
    pub repo: R,
}

impl<R: ProfileRepository> GetProfileUseCase<R> {
    pub async fn execute(&self, id: Uuid) -> Result<Profile, UsersServiceError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(UsersServiceError::UserNotFound)
    }
}

// ── GetProfileByEmail ────────────────────────────────────────────────────────

pub struct GetProfileByEmailUseCase<R: ProfileRepository> {
    pub repo: R,
}

impl<R: ProfileRepository> GetProfileByEmailUseCase<R> {
    pub async fn execute(&self, email: &str) -> Result<Profile, UsersServiceError> {
        self.repo
            .find_by_email(&normalize_email(email))
            .await?
            .ok_or(UsersServiceError::UserNotFound)
    }
}

// ── UpdateProfile ────────────────────────────────────────────────────────────

pub struct UpdateProfileUseCase<R: ProfileRepository> {
    pub repo: R,
}

impl<R: ProfileRepository> UpdateProfileUseCase<R> {
    pub async fn execute(
        &self,
        id: Uuid,
        fields: ProfileFields,
    ) -> Result<Profile, UsersServiceError> {
        if fields.is_empty() {
            return Err(UsersServiceError::MissingData);
        }
        let mut profile = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(UsersServiceError::UserNotFound)?;
        profile.fields.merge(fields);
        profile.updated_at = Utc::now();
        self.repo.save(&profile).await?;
        Ok(profile)
    }
}
