use chrono::{DateTime, Utc};
use uuid::Uuid;

use nomnom_domain::delivery::{DeliveryStatus, DriverApplicationStatus};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub id: Uuid,
    pub order_id: String,
    pub customer_id: Uuid,
    pub restaurant_id: Option<Uuid>,
    pub driver_id: Option<Uuid>,
    pub customer_phone: Option<String>,
    pub customer_email: Option<String>,
    pub pickup_address: Option<String>,
    pub dropoff_address: Option<String>,
    pub status: DeliveryStatus,
    pub created_at: DateTime<Utc>,
    pub accepted_at: Option<DateTime<Utc>>,
    pub picked_up_at: Option<DateTime<Utc>>,
    pub delivered_at: Option<DateTime<Utc>>,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

impl Delivery {
    /// Copy of `self` moved to `next` with the matching timestamp stamped.
    /// The caller has already checked that the transition is legal.
    pub fn advanced(&self, next: DeliveryStatus, driver_id: Option<Uuid>, now: DateTime<Utc>) -> Self {
        let mut updated = self.clone();
        updated.status = next;
        updated.updated_at = now;
        match next {
            DeliveryStatus::Accepted => {
                updated.driver_id = driver_id;
                updated.accepted_at = Some(now);
            }
            DeliveryStatus::InProgress => updated.picked_up_at = Some(now),
            DeliveryStatus::Delivered => updated.delivered_at = Some(now),
            DeliveryStatus::Cancelled => updated.cancelled_at = Some(now),
            DeliveryStatus::Pending => {}
        }
        updated
    }
}

/// Which delivery a status change addresses.
#[derive(Debug, Clone)]
pub enum DeliveryRef {
    Id(Uuid),
    Order(String),
}

#[derive(Debug, Clone, Default)]
pub struct DeliveryFilter {
    pub driver_id: Option<Uuid>,
    pub status: Option<DeliveryStatus>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverApplication {
    pub user_id: Uuid,
    pub vehicle_number: String,
    pub vehicle_type_id: i64,
    pub license_number: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub status: DriverApplicationStatus,
    pub created_at: DateTime<Utc>,
    pub decided_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

/// Events pushed to the notification service.
pub mod events {
    pub const DELIVERY_CREATED: &str = "delivery.created";
    pub const DELIVERY_STATUS: &str = "delivery.status";
    pub const DELIVERY_ASSIGNED: &str = "delivery.assigned";
    pub const DRIVER_APPLICATION: &str = "driver.application";
}
