pub mod client;
pub mod google;
pub mod local;
pub mod password;
pub mod session;

use serde::Serialize;
use uuid::Uuid;

use nomnom_domain::user::UserType;

use crate::domain::types::SignedIn;

/// Body returned by every endpoint that signs a user in.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub message: &'static str,
    pub user_id: Uuid,
    pub session_id: Uuid,
    pub token: String,
    pub user_type: UserType,
    pub profile_incomplete: bool,
    pub email: String,
    pub is_new_user: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

impl AuthResponse {
    pub fn new(message: &'static str, signed_in: SignedIn) -> Self {
        Self {
            message,
            user_id: signed_in.user.id,
            session_id: signed_in.session.session_id,
            token: signed_in.session.token,
            user_type: signed_in.session.user_type,
            profile_incomplete: signed_in.profile_incomplete,
            email: signed_in.user.email,
            is_new_user: signed_in.is_new_user,
            first_name: signed_in.first_name,
            last_name: signed_in.last_name,
        }
    }
}
