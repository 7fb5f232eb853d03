use chrono::{DateTime, Utc};
use uuid::Uuid;

use nomnom_domain::profile::{ProfileFields, missing_fields};
use nomnom_domain::user::UserType;

/// Stored user profile. `id` is the identity id issued by the auth service.
#[derive(Debug, Clone)]
pub struct Profile {
    pub id: Uuid,
    pub email: String,
    pub user_type: UserType,
    pub fields: ProfileFields,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    pub fn missing_fields(&self) -> Vec<&'static str> {
        missing_fields(self.user_type, &self.fields)
    }
}
