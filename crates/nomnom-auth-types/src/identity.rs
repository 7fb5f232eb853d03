//! Gateway-injected identity headers extractor.

use axum::extract::FromRequestParts;
use http::StatusCode;
use http::request::Parts;
use uuid::Uuid;

use nomnom_domain::user::UserType;

pub const X_NOMNOM_USER_ID: &str = "x-nomnom-user-id";
pub const X_NOMNOM_USER_TYPE: &str = "x-nomnom-user-type";

/// User identity injected by the gateway via `x-nomnom-user-id` and `x-nomnom-user-type`.
///
/// Returns 401 if either header is absent or unparsable.
/// Role enforcement (403) is done by handlers after extraction.
#[derive(Debug, Clone)]
pub struct IdentityHeaders {
    pub user_id: Uuid,
    pub user_type: UserType,
}

impl<S> FromRequestParts<S> for IdentityHeaders
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    // Read headers synchronously and return a 'static future: an `async fn` here
    // would capture the `parts` lifetime and fail the trait's signature (E0195).
    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let user_id = parts
            .headers
            .get(X_NOMNOM_USER_ID)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<Uuid>().ok());

        let user_type = parts
            .headers
            .get(X_NOMNOM_USER_TYPE)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<UserType>().ok());

        async move {
            let user_id = user_id.ok_or(StatusCode::UNAUTHORIZED)?;
            let user_type = user_type.ok_or(StatusCode::UNAUTHORIZED)?;
            Ok(Self { user_id, user_type })
        }
    }
}
