use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use nomnom_auth_types::identity::IdentityHeaders;
use nomnom_domain::profile::ProfileFields;
use nomnom_domain::user::UserType;

use crate::domain::types::Profile;
use crate::error::UsersServiceError;
use crate::state::AppState;
use crate::usecase::user::{
    GetProfileByEmailUseCase, GetProfileUseCase, UpdateProfileUseCase, UpsertProfileInput,
    UpsertProfileUseCase,
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub id: String,
    pub email: String,
    pub user_type: UserType,
    #[serde(flatten)]
    pub fields: ProfileFields,
    pub missing_fields: Vec<&'static str>,
    #[serde(serialize_with = "nomnom_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "nomnom_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Profile> for ProfileResponse {
    fn from(profile: Profile) -> Self {
        Self {
            id: profile.id.to_string(),
            missing_fields: profile.missing_fields(),
            email: profile.email,
            user_type: profile.user_type,
            fields: profile.fields,
            created_at: profile.created_at,
            updated_at: profile.updated_at,
        }
    }
}

// ── PUT /users/{id} ──────────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertProfileRequest {
    pub email: String,
    pub user_type: UserType,
    #[serde(flatten)]
    pub fields: ProfileFields,
}

pub async fn upsert_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpsertProfileRequest>,
) -> Result<Json<ProfileResponse>, UsersServiceError> {
    let usecase = UpsertProfileUseCase {
        repo: state.profile_repo(),
    };
    let profile = usecase
        .execute(UpsertProfileInput {
            id,
            email: body.email,
            user_type: body.user_type,
            fields: body.fields,
        })
        .await?;
    Ok(Json(profile.into()))
}

// ── GET /users/{id} ──────────────────────────────────────────────────────────

pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ProfileResponse>, UsersServiceError> {
    let usecase = GetProfileUseCase {
        repo: state.profile_repo(),
    };
    Ok(Json(usecase.execute(id).await?.into()))
}

// ── GET /users/email/{email} ─────────────────────────────────────────────────

pub async fn get_user_by_email(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<ProfileResponse>, UsersServiceError> {
    let usecase = GetProfileByEmailUseCase {
        repo: state.profile_repo(),
    };
    Ok(Json(usecase.execute(&email).await?.into()))
}

// ── GET /users/@me ───────────────────────────────────────────────────────────

pub async fn get_me(
    identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<Json<ProfileResponse>, UsersServiceError> {
    let usecase = GetProfileUseCase {
        repo: state.profile_repo(),
    };
    Ok(Json(usecase.execute(identity.user_id).await?.into()))
}

// ── PATCH /users/@me ─────────────────────────────────────────────────────────

pub async fn update_me(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Json(body): Json<ProfileFields>,
) -> Result<Json<ProfileResponse>, UsersServiceError> {
    let usecase = UpdateProfileUseCase {
        repo: state.profile_repo(),
    };
    let profile = usecase.execute(identity.user_id, body).await?;
    Ok(Json(profile.into()))
}
