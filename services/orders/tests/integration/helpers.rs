use std::sync::{Arc, Mutex};

use chrono::Utc;
use uuid::Uuid;

use nomnom_domain::order::{DELIVERY_FEE_CENTS, OrderStatus, PaymentType, PortionSize};
use nomnom_domain::pagination::PageRequest;
use nomnom_orders::domain::repository::{DeliveryPort, OrderRepository};
use nomnom_orders::domain::types::{Order, OrderItem};
use nomnom_orders::error::OrdersServiceError;

// ── MockOrderRepo ────────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockOrderRepo {
    pub orders: Arc<Mutex<Vec<Order>>>,
}

impl MockOrderRepo {
    pub fn new(orders: Vec<Order>) -> Self {
        Self {
            orders: Arc::new(Mutex::new(orders)),
        }
    }

    pub fn stored(&self, id: Uuid) -> Order {
        self.orders
            .lock()
            .unwrap()
            .iter()
            .find(|o| o.id == id)
            .cloned()
            .unwrap()
    }
}

impl OrderRepository for MockOrderRepo {
    async fn create(&self, order: &Order) -> Result<(), OrdersServiceError> {
        self.orders.lock().unwrap().push(order.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, OrdersServiceError> {
        Ok(self
            .orders
            .lock()
            .unwrap()
            .iter()
            .find(|o| o.id == id)
            .cloned())
    }

    async fn list_by_customer(
        &self,
        customer_id: Uuid,
        page: PageRequest,
    ) -> Result<Vec<Order>, OrdersServiceError> {
        let mut matching: Vec<Order> = self
            .orders
            .lock()
            .unwrap()
            .iter()
            .filter(|o| o.customer_id == customer_id)
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matching
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.per_page as usize)
            .collect())
    }

    async fn compare_and_set(
        &self,
        updated: &Order,
        expected_status: OrderStatus,
        expected_total: i64,
    ) -> Result<bool, OrdersServiceError> {
        let mut orders = self.orders.lock().unwrap();
        match orders.iter_mut().find(|o| o.id == updated.id) {
            Some(stored)
                if stored.status == expected_status && stored.total_amount == expected_total =>
            {
                stored.status = updated.status;
                stored.discount = updated.discount;
                stored.total_amount = updated.total_amount;
                stored.cancelled_at = updated.cancelled_at;
                stored.updated_at = updated.updated_at;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

/// Reads return a fixed snapshot while writes hit the shared store, like a
/// request that loaded the row just before another writer changed it.
pub struct StaleOrderRepo {
    pub inner: MockOrderRepo,
    pub snapshot: Order,
}

impl OrderRepository for StaleOrderRepo {
    async fn create(&self, order: &Order) -> Result<(), OrdersServiceError> {
        self.inner.create(order).await
    }

    async fn find_by_id(&self, _id: Uuid) -> Result<Option<Order>, OrdersServiceError> {
        Ok(Some(self.snapshot.clone()))
    }

    async fn list_by_customer(
        &self,
        customer_id: Uuid,
        page: PageRequest,
    ) -> Result<Vec<Order>, OrdersServiceError> {
        self.inner.list_by_customer(customer_id, page).await
    }

    async fn compare_and_set(
        &self,
        updated: &Order,
        expected_status: OrderStatus,
        expected_total: i64,
    ) -> Result<bool, OrdersServiceError> {
        self.inner
            .compare_and_set(updated, expected_status, expected_total)
            .await
    }
}

// ── MockDelivery ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Open(Uuid),
    Cancel(Uuid),
}

#[derive(Clone, Default)]
pub struct MockDelivery {
    pub calls: Arc<Mutex<Vec<Call>>>,
    pub fail: bool,
}

impl MockDelivery {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) -> Result<(), OrdersServiceError> {
        self.calls.lock().unwrap().push(call);
        if self.fail {
            return Err(anyhow::anyhow!("delivery service unavailable").into());
        }
        Ok(())
    }
}

impl DeliveryPort for MockDelivery {
    async fn open_delivery(&self, order: &Order) -> Result<(), OrdersServiceError> {
        self.record(Call::Open(order.id))
    }

    async fn cancel_delivery(&self, order_id: Uuid) -> Result<(), OrdersServiceError> {
        self.record(Call::Cancel(order_id))
    }
}

// ── Fixtures ─────────────────────────────────────────────────────────────────

/// A PENDING order of two dosas at 4.50 each.
pub fn pending_order(customer_id: Uuid, restaurant_id: Uuid) -> Order {
    let now = Utc::now();
    Order {
        id: Uuid::now_v7(),
        customer_id,
        restaurant_id,
        customer_name: "Ada".to_owned(),
        customer_contact: Some("+15550100".to_owned()),
        delivery_address: "9 Home St".to_owned(),
        payment_type: PaymentType::Cash,
        status: OrderStatus::Pending,
        items: vec![OrderItem {
            item_id: "dosa".to_owned(),
            item_name: "Masala Dosa".to_owned(),
            quantity: 2,
            portion_size: PortionSize::Small,
            unit_price: 450,
            line_total: 900,
            image: None,
        }],
        order_total: 900,
        delivery_fee: DELIVERY_FEE_CENTS,
        discount: 0,
        total_amount: 900 + DELIVERY_FEE_CENTS,
        created_at: now,
        cancelled_at: None,
        updated_at: now,
    }
}

pub fn with_status(mut order: Order, status: OrderStatus) -> Order {
    order.status = status;
    order
}
