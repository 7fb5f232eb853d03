use sea_orm::entity::prelude::*;

/// A placed order. Money columns are integer cents.
/// `total_amount` is `order_total + delivery_fee - discount`, floored at zero.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub customer_id: Uuid,
    pub restaurant_id: Uuid,
    pub customer_name: String,
    pub customer_contact: Option<String>,
    pub delivery_address: String,
    pub payment_type: String,
    pub status: String,
    pub order_total: i64,
    pub delivery_fee: i64,
    pub discount: i64,
    pub total_amount: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub cancelled_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::order_items::Entity")]
    OrderItems,
}

impl Related<super::order_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
