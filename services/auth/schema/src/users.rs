use sea_orm::entity::prelude::*;

/// Identity record owned by the auth service.
/// Profile data lives in the users service under the same id.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub email: String,
    /// Argon2 PHC string; absent for Google-only accounts.
    pub password_hash: Option<String>,
    pub user_type: String,
    #[sea_orm(unique)]
    pub google_id: Option<String>,
    pub is_google_user: bool,
    pub auth_provider: String,
    pub profile_completed: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::reset_codes::Entity")]
    ResetCodes,
}

impl Related<super::reset_codes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ResetCodes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
