//! Session-token (JWT) validation.

use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::Deserialize;
#[cfg(any(feature = "USE_ONLY_IN_SESSIONS_SERVICE", test))]
use serde::Serialize;
use uuid::Uuid;

use nomnom_domain::user::UserType;

/// Identity carried by a validated session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionTokenInfo {
    pub user_id: Uuid,
    pub session_id: Uuid,
    pub user_type: UserType,
    pub expires_at: u64,
}

/// Errors returned by [`validate_session_token`].
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("invalid signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("malformed token")]
    Malformed,
}

/// JWT claims of a session token.
///
/// | Field | JWT claim | Meaning |
/// |-------|-----------|---------|
/// | `sub` | `sub` | user id (UUID string) |
/// | `sid` | custom | session id (UUID string) |
/// | `user_type` | custom | role at issue time |
/// | `exp` | `exp` | seconds since epoch |
///
/// [`Serialize`] requires the **`USE_ONLY_IN_SESSIONS_SERVICE`** feature; the
/// sessions service is the only issuer.
#[derive(Debug, Deserialize)]
#[cfg_attr(
    any(feature = "USE_ONLY_IN_SESSIONS_SERVICE", test),
    derive(Serialize)
)]
pub struct SessionClaims {
    pub sub: String,
    pub sid: String,
    pub user_type: UserType,
    pub exp: u64,
}

/// HS256 with `exp` checked; `exp`, `sub` required. Default 60s leeway.
fn decode_claims(token: &str, secret: &str) -> Result<SessionClaims, TokenError> {
    let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
    validation.validate_exp = true;
    validation.required_spec_claims.clear();
    validation.set_required_spec_claims(&["exp", "sub"]);

    let data = decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidSignature => TokenError::InvalidSignature,
        _ => TokenError::Malformed,
    })?;

    Ok(data.claims)
}

/// Check signature and expiry of a session token and parse its identity.
///
/// This does not consult the session store, so a revoked session still passes;
/// callers that need revocation ask the sessions service.
pub fn validate_session_token(token: &str, secret: &str) -> Result<SessionTokenInfo, TokenError> {
    let claims = decode_claims(token, secret)?;
    let user_id = claims
        .sub
        .parse::<Uuid>()
        .map_err(|_| TokenError::Malformed)?;
    let session_id = claims
        .sid
        .parse::<Uuid>()
        .map_err(|_| TokenError::Malformed)?;
    Ok(SessionTokenInfo {
        user_id,
        session_id,
        user_type: claims.user_type,
        expires_at: claims.exp,
    })
}
