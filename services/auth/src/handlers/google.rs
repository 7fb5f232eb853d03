use axum::{
    Json,
    extract::{Path, State},
    http::HeaderMap,
};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use nomnom_auth_types::cookie::set_session_cookie;
use nomnom_domain::profile::ProfileFields;
use nomnom_domain::user::UserType;

use crate::error::AuthServiceError;
use crate::handlers::AuthResponse;
use crate::handlers::client::RequestOrigin;
use crate::handlers::session::session_token;
use crate::state::AppState;
use crate::usecase::google::{GoogleSignInInput, GoogleSignInUseCase};
use crate::usecase::profile::{
    CompleteProfileInput, CompleteProfileUseCase, ProfileCompletionUseCase,
};

const NEW_GOOGLE_USER: &str = "Google account connected successfully";
const RETURNING_GOOGLE_USER: &str = "Signed in with Google";

// ── POST /auth/google/token ───────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleTokenRequest {
    #[serde(default)]
    pub token: String,
    pub device: Option<String>,
    pub ip_address: Option<String>,
}

pub async fn google_token(
    State(state): State<AppState>,
    origin: RequestOrigin,
    jar: CookieJar,
    Json(body): Json<GoogleTokenRequest>,
) -> Result<(CookieJar, Json<AuthResponse>), AuthServiceError> {
    let usecase = GoogleSignInUseCase {
        verifier: state.verifier.clone(),
        users: state.user_repo(),
        sessions: state.sessions.clone(),
        profiles: state.profiles.clone(),
    };
    let signed_in = usecase
        .execute(GoogleSignInInput {
            token: body.token,
            meta: origin.meta(body.device, body.ip_address),
        })
        .await?;

    let message = if signed_in.is_new_user {
        NEW_GOOGLE_USER
    } else {
        RETURNING_GOOGLE_USER
    };
    let jar = set_session_cookie(
        jar,
        signed_in.session.token.clone(),
        state.cookie_domain.clone(),
    );
    Ok((jar, Json(AuthResponse::new(message, signed_in))))
}

// ── POST /auth/google/complete-profile ────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteProfileRequest {
    pub user_id: Uuid,
    pub user_type: UserType,
    pub device: Option<String>,
    pub ip_address: Option<String>,
    #[serde(flatten)]
    pub fields: ProfileFields,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteProfileResponse {
    pub message: &'static str,
    pub user_id: Uuid,
    pub session_id: Uuid,
    pub token: String,
    pub user_type: UserType,
    pub profile_incomplete: bool,
}

/// Requires the session issued at sign-in; `userId` must be its owner.
pub async fn complete_profile(
    State(state): State<AppState>,
    origin: RequestOrigin,
    headers: HeaderMap,
    jar: CookieJar,
    Json(body): Json<CompleteProfileRequest>,
) -> Result<(CookieJar, Json<CompleteProfileResponse>), AuthServiceError> {
    let token = session_token(&headers, &jar).ok_or(AuthServiceError::InvalidSession)?;
    let usecase = CompleteProfileUseCase {
        users: state.user_repo(),
        profiles: state.profiles.clone(),
        sessions: state.sessions.clone(),
    };
    let out = usecase
        .execute(CompleteProfileInput {
            session_token: token,
            user_id: body.user_id,
            user_type: body.user_type,
            fields: body.fields,
            meta: origin.meta(body.device, body.ip_address),
        })
        .await?;

    let jar = set_session_cookie(jar, out.session.token.clone(), state.cookie_domain.clone());
    Ok((
        jar,
        Json(CompleteProfileResponse {
            message: "Profile completed successfully",
            user_id: out.user_id,
            session_id: out.session.session_id,
            token: out.session.token,
            user_type: out.session.user_type,
            profile_incomplete: false,
        }),
    ))
}

// ── GET /auth/profile-completion/{user_id} ────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileCompletionResponse {
    pub is_complete: bool,
    pub user_type: UserType,
    pub email: String,
    pub missing_fields: Vec<&'static str>,
}

pub async fn profile_completion(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<ProfileCompletionResponse>, AuthServiceError> {
    let usecase = ProfileCompletionUseCase {
        users: state.user_repo(),
        profiles: state.profiles.clone(),
    };
    let completion = usecase.execute(user_id).await?;
    Ok(Json(ProfileCompletionResponse {
        is_complete: completion.is_complete,
        user_type: completion.user_type,
        email: completion.email,
        missing_fields: completion.missing_fields,
    }))
}
