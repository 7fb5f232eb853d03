//! Mock gateway identity for router tests.
//!
//! Services behind the gateway trust `x-nomnom-user-id` + `x-nomnom-user-type`.
//! Tests attach the same headers directly, so no gateway or session token is needed.

use axum::http::{HeaderMap, HeaderName, HeaderValue};
use uuid::Uuid;

use nomnom_auth_types::identity::{X_NOMNOM_USER_ID, X_NOMNOM_USER_TYPE};
use nomnom_domain::user::UserType;

pub struct MockAuth {
    pub user_id: Uuid,
    pub user_type: UserType,
}

impl MockAuth {
    pub fn new(user_id: Uuid, user_type: UserType) -> Self {
        Self { user_id, user_type }
    }

    pub fn customer() -> Self {
        Self::new(Uuid::new_v4(), UserType::Customer)
    }

    /// Headers as the gateway would inject them.
    pub fn headers(&self) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(
            HeaderName::from_static(X_NOMNOM_USER_ID),
            HeaderValue::from_str(&self.user_id.to_string()).unwrap(),
        );
        map.insert(
            HeaderName::from_static(X_NOMNOM_USER_TYPE),
            HeaderValue::from_static(self.user_type.as_str()),
        );
        map
    }
}
