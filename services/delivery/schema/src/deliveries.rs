use sea_orm::entity::prelude::*;

/// One delivery per order. `status` only moves along the legal transitions and
/// is written with a compare-and-set on the previously observed value.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "deliveries")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub order_id: String,
    pub customer_id: Uuid,
    pub restaurant_id: Option<Uuid>,
    pub driver_id: Option<Uuid>,
    pub customer_phone: Option<String>,
    pub customer_email: Option<String>,
    pub pickup_address: Option<String>,
    pub dropoff_address: Option<String>,
    pub status: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub accepted_at: Option<chrono::DateTime<chrono::Utc>>,
    pub picked_up_at: Option<chrono::DateTime<chrono::Utc>>,
    pub delivered_at: Option<chrono::DateTime<chrono::Utc>>,
    pub cancelled_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
