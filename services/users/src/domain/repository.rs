#![allow(async_fn_in_trait)]

use uuid::Uuid;

use crate::domain::types::Profile;
use crate::error::UsersServiceError;

/// Repository for user profiles.
pub trait ProfileRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Profile>, UsersServiceError>;

    /// `email` must already be normalised.
    async fn find_by_email(&self, email: &str) -> Result<Option<Profile>, UsersServiceError>;

    /// Insert or replace the profile with `profile.id`.
    /// Returns `EmailAlreadyInUse` when the email belongs to another profile.
    async fn save(&self, profile: &Profile) -> Result<(), UsersServiceError>;
}
