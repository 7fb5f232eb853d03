#![allow(async_fn_in_trait)]

use uuid::Uuid;

use nomnom_domain::order::OrderStatus;
use nomnom_domain::pagination::PageRequest;

use crate::domain::types::Order;
use crate::error::OrdersServiceError;

/// Repository for orders and their line items.
pub trait OrderRepository: Send + Sync {
    /// Insert the order and all of its items atomically.
    async fn create(&self, order: &Order) -> Result<(), OrdersServiceError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, OrdersServiceError>;

    /// Newest first.
    async fn list_by_customer(
        &self,
        customer_id: Uuid,
        page: PageRequest,
    ) -> Result<Vec<Order>, OrdersServiceError>;

    /// Persist the status, discount and totals of `updated` only if the stored
    /// row still has `expected_status` and `expected_total`. Items are never rewritten.
    /// Returns `false` when another writer got there first.
    async fn compare_and_set(
        &self,
        updated: &Order,
        expected_status: OrderStatus,
        expected_total: i64,
    ) -> Result<bool, OrdersServiceError>;
}

/// Outbound calls to the delivery service. Callers treat failures as best-effort.
pub trait DeliveryPort: Send + Sync {
    async fn open_delivery(&self, order: &Order) -> Result<(), OrdersServiceError>;

    async fn cancel_delivery(&self, order_id: Uuid) -> Result<(), OrdersServiceError>;
}
