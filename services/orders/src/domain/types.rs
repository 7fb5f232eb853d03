use chrono::{DateTime, Utc};
use uuid::Uuid;

use nomnom_domain::order::{OrderStatus, PaymentType, PortionSize, apply_discount};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderItem {
    pub item_id: String,
    pub item_name: String,
    pub quantity: i32,
    pub portion_size: PortionSize,
    pub unit_price: i64,
    pub line_total: i64,
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub restaurant_id: Uuid,
    pub customer_name: String,
    pub customer_contact: Option<String>,
    pub delivery_address: String,
    pub payment_type: PaymentType,
    pub status: OrderStatus,
    pub items: Vec<OrderItem>,
    pub order_total: i64,
    pub delivery_fee: i64,
    pub discount: i64,
    pub total_amount: i64,
    pub created_at: DateTime<Utc>,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// The customer who placed it or the restaurant fulfilling it.
    pub fn is_party(&self, user_id: Uuid) -> bool {
        self.customer_id == user_id || self.restaurant_id == user_id
    }

    /// Copy of `self` moved to `next`. The caller has already checked the transition.
    pub fn advanced(&self, next: OrderStatus, now: DateTime<Utc>) -> Self {
        let mut updated = self.clone();
        updated.status = next;
        updated.updated_at = now;
        if next == OrderStatus::Cancelled {
            updated.cancelled_at = Some(now);
        }
        updated
    }

    /// Copy of `self` with `amount` more taken off the payable total.
    /// `discount` records what was actually removed, so it never exceeds the
    /// pre-discount total.
    pub fn discounted(&self, amount: i64, now: DateTime<Utc>) -> Self {
        let mut updated = self.clone();
        updated.total_amount = apply_discount(self.total_amount, amount);
        updated.discount = self.discount + (self.total_amount - updated.total_amount);
        updated.updated_at = now;
        updated
    }
}
