use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode, header},
};
use axum_extra::extract::CookieJar;
use serde::Serialize;
use uuid::Uuid;

use nomnom_auth_types::cookie::{NOMNOM_SESSION, clear_session_cookie};
use nomnom_domain::user::UserType;

use crate::error::AuthServiceError;
use crate::handlers::client::RequestOrigin;
use crate::state::AppState;
use crate::usecase::session::{CurrentSessionUseCase, LogoutUseCase};

/// `Authorization: Bearer` first, then the session cookie.
pub(crate) fn session_token(headers: &HeaderMap, jar: &CookieJar) -> Option<String> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_owned);
    bearer.or_else(|| {
        jar.get(NOMNOM_SESSION)
            .map(|c| c.value().to_owned())
            .filter(|t| !t.is_empty())
    })
}

// ── POST /auth/logout ─────────────────────────────────────────────────────────

pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
    jar: CookieJar,
) -> Result<(StatusCode, CookieJar), AuthServiceError> {
    let token = session_token(&headers, &jar).ok_or(AuthServiceError::InvalidSession)?;
    let usecase = LogoutUseCase {
        sessions: state.sessions.clone(),
    };
    usecase.execute(&token).await?;
    let jar = clear_session_cookie(jar, state.cookie_domain.clone());
    Ok((StatusCode::NO_CONTENT, jar))
}

// ── GET /auth/session ─────────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub user_id: Uuid,
    pub session_id: Uuid,
    pub user_type: UserType,
    pub expires_at: String,
}

pub async fn current_session(
    State(state): State<AppState>,
    headers: HeaderMap,
    jar: CookieJar,
) -> Result<Json<SessionResponse>, AuthServiceError> {
    let token = session_token(&headers, &jar).ok_or(AuthServiceError::InvalidSession)?;
    let usecase = CurrentSessionUseCase {
        sessions: state.sessions.clone(),
    };
    let session = usecase.execute(&token).await?;
    Ok(Json(SessionResponse {
        user_id: session.user_id,
        session_id: session.session_id,
        user_type: session.user_type,
        expires_at: session.expires_at,
    }))
}

// ── GET /auth/client-ip ───────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct ClientIpResponse {
    pub ip: String,
}

pub async fn client_ip(origin: RequestOrigin) -> Json<ClientIpResponse> {
    Json(ClientIpResponse {
        ip: origin.meta(None, None).ip_address,
    })
}
