#![allow(async_fn_in_trait)]

use chrono::{DateTime, Utc};
use uuid::Uuid;

use nomnom_domain::delivery::{DeliveryStatus, DriverApplicationStatus};
use nomnom_domain::pagination::PageRequest;

use crate::domain::types::{Delivery, DeliveryFilter, DriverApplication};
use crate::error::DeliveryServiceError;

/// Repository for deliveries.
pub trait DeliveryRepository: Send + Sync {
    /// Returns `DeliveryAlreadyExists` when the order already has a delivery.
    async fn create(&self, delivery: &Delivery) -> Result<(), DeliveryServiceError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Delivery>, DeliveryServiceError>;

    async fn find_by_order_id(
        &self,
        order_id: &str,
    ) -> Result<Option<Delivery>, DeliveryServiceError>;

    /// Newest first.
    async fn list(
        &self,
        filter: &DeliveryFilter,
        page: PageRequest,
    ) -> Result<Vec<Delivery>, DeliveryServiceError>;

    /// Persist `updated` only if the stored status still equals `expected`.
    /// Returns `false` when another writer got there first.
    async fn compare_and_set_status(
        &self,
        updated: &Delivery,
        expected: DeliveryStatus,
    ) -> Result<bool, DeliveryServiceError>;
}

/// Repository for driver applications (one per user).
pub trait DriverApplicationRepository: Send + Sync {
    async fn find_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Option<DriverApplication>, DeliveryServiceError>;

    /// Insert or replace the application of `application.user_id`.
    async fn save(&self, application: &DriverApplication) -> Result<(), DeliveryServiceError>;

    /// Move a PENDING application to `decision`. `false` if it was no longer PENDING.
    async fn decide(
        &self,
        user_id: Uuid,
        decision: DriverApplicationStatus,
        at: DateTime<Utc>,
    ) -> Result<bool, DeliveryServiceError>;
}

/// Outbound notifications. Callers treat failures as best-effort.
pub trait NotificationPort: Send + Sync {
    async fn push(
        &self,
        user_id: Uuid,
        event: &str,
        payload: serde_json::Value,
    ) -> Result<(), DeliveryServiceError>;

    async fn sms(&self, phone_number: &str, message: &str) -> Result<(), DeliveryServiceError>;

    async fn email(&self, to: &str, subject: &str, text: &str)
    -> Result<(), DeliveryServiceError>;
}
