use sea_orm::entity::prelude::*;

/// Profile record keyed by the identity id issued by the auth service.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "profiles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub email: String,
    pub user_type: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub contact_number: Option<String>,
    pub address: Option<String>,
    pub profile_image: Option<String>,
    pub restaurant_name: Option<String>,
    pub restaurant_license_number: Option<String>,
    pub restaurant_type_id: Option<i64>,
    /// JSON array of cuisine type ids.
    pub cuisine_type_ids: Json,
    pub vehicle_number: Option<String>,
    pub vehicle_type_id: Option<i64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
