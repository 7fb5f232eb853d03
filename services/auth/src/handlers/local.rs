use axum::{Json, extract::State, http::StatusCode};
use axum_extra::extract::CookieJar;
use serde::Deserialize;

use nomnom_auth_types::cookie::set_session_cookie;
use nomnom_domain::user::UserType;

use crate::error::AuthServiceError;
use crate::handlers::AuthResponse;
use crate::handlers::client::RequestOrigin;
use crate::state::AppState;
use crate::usecase::local::{SignInInput, SignInUseCase, SignUpInput, SignUpUseCase};

// ── POST /auth/sign-up ────────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    pub user_type: Option<UserType>,
    pub device: Option<String>,
    pub ip_address: Option<String>,
}

pub async fn sign_up(
    State(state): State<AppState>,
    origin: RequestOrigin,
    jar: CookieJar,
    Json(body): Json<SignUpRequest>,
) -> Result<(StatusCode, CookieJar, Json<AuthResponse>), AuthServiceError> {
    let usecase = SignUpUseCase {
        users: state.user_repo(),
        sessions: state.sessions.clone(),
    };
    let signed_in = usecase
        .execute(SignUpInput {
            email: body.email,
            password: body.password,
            user_type: body.user_type,
            meta: origin.meta(body.device, body.ip_address),
        })
        .await?;

    let jar = set_session_cookie(
        jar,
        signed_in.session.token.clone(),
        state.cookie_domain.clone(),
    );
    Ok((
        StatusCode::CREATED,
        jar,
        Json(AuthResponse::new("Account created successfully", signed_in)),
    ))
}

// ── POST /auth/sign-in ────────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
    pub device: Option<String>,
    pub ip_address: Option<String>,
}

pub async fn sign_in(
    State(state): State<AppState>,
    origin: RequestOrigin,
    jar: CookieJar,
    Json(body): Json<SignInRequest>,
) -> Result<(CookieJar, Json<AuthResponse>), AuthServiceError> {
    let usecase = SignInUseCase {
        users: state.user_repo(),
        sessions: state.sessions.clone(),
        profiles: state.profiles.clone(),
    };
    let signed_in = usecase
        .execute(SignInInput {
            email: body.email,
            password: body.password,
            meta: origin.meta(body.device, body.ip_address),
        })
        .await?;

    let jar = set_session_cookie(
        jar,
        signed_in.session.token.clone(),
        state.cookie_domain.clone(),
    );
    Ok((jar, Json(AuthResponse::new("Signed in successfully", signed_in))))
}
