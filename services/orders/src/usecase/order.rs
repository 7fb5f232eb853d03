use chrono::Utc;
use uuid::Uuid;

use nomnom_domain::order::{
    DELIVERY_FEE_CENTS, OrderStatus, PaymentType, PortionSize, line_total,
};
use nomnom_domain::pagination::PageRequest;

use crate::domain::repository::{DeliveryPort, OrderRepository};
use crate::domain::types::{Order, OrderItem};
use crate::error::OrdersServiceError;

async fn load<R: OrderRepository>(repo: &R, id: Uuid) -> Result<Order, OrdersServiceError> {
    repo.find_by_id(id)
        .await?
        .ok_or(OrdersServiceError::OrderNotFound)
}

fn invalid(message: &str) -> OrdersServiceError {
    OrdersServiceError::InvalidRequest(message.to_owned())
}

fn required(value: String, field: &str) -> Result<String, OrdersServiceError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(OrdersServiceError::InvalidRequest(format!("{field} is required")));
    }
    Ok(value.to_owned())
}

// ── CreateOrder ──────────────────────────────────────────────────────────────

pub struct CartItemInput {
    pub item_id: String,
    pub item_name: String,
    pub quantity: i32,
    pub portion_size: Option<PortionSize>,
    pub unit_price: i64,
    pub image: Option<String>,
}

pub struct CreateOrderInput {
    pub customer_id: Uuid,
    pub restaurant_id: Uuid,
    pub customer_name: String,
    pub customer_contact: Option<String>,
    pub delivery_address: String,
    pub payment_type: PaymentType,
    pub items: Vec<CartItemInput>,
}

/// Price every cart line and the cart as a whole. Client-sent totals are never trusted.
fn price_items(items: Vec<CartItemInput>) -> Result<(Vec<OrderItem>, i64), OrdersServiceError> {
    if items.is_empty() {
        return Err(invalid("order must contain at least one item"));
    }
    let mut priced = Vec::with_capacity(items.len());
    let mut order_total: i64 = 0;
    for item in items {
        if item.quantity < 1 {
            return Err(invalid("quantity must be at least 1"));
        }
        if item.unit_price < 0 {
            return Err(invalid("price must not be negative"));
        }
        let total = line_total(item.unit_price, item.quantity)
            .ok_or_else(|| invalid("order total is too large"))?;
        order_total = order_total
            .checked_add(total)
            .ok_or_else(|| invalid("order total is too large"))?;
        priced.push(OrderItem {
            item_id: required(item.item_id, "itemId")?,
            item_name: required(item.item_name, "itemName")?,
            quantity: item.quantity,
            portion_size: item.portion_size.unwrap_or_default(),
            unit_price: item.unit_price,
            line_total: total,
            image: item.image.filter(|i| !i.trim().is_empty()),
        });
    }
    Ok((priced, order_total))
}

pub struct CreateOrderUseCase<R: OrderRepository, D: DeliveryPort> {
    pub repo: R,
    pub delivery: D,
}

impl<R: OrderRepository, D: DeliveryPort> CreateOrderUseCase<R, D> {
    pub async fn execute(&self, input: CreateOrderInput) -> Result<Order, OrdersServiceError> {
        let customer_name = required(input.customer_name, "customerName")?;
        let delivery_address = required(input.delivery_address, "deliveryAddress")?;
        let (items, order_total) = price_items(input.items)?;
        let total_amount = order_total
            .checked_add(DELIVERY_FEE_CENTS)
            .ok_or_else(|| invalid("order total is too large"))?;

        let now = Utc::now();
        let order = Order {
            id: Uuid::now_v7(),
            customer_id: input.customer_id,
            restaurant_id: input.restaurant_id,
            customer_name,
            customer_contact: input
                .customer_contact
                .map(|c| c.trim().to_owned())
                .filter(|c| !c.is_empty()),
            delivery_address,
            payment_type: input.payment_type,
            status: OrderStatus::Pending,
            items,
            order_total,
            delivery_fee: DELIVERY_FEE_CENTS,
            discount: 0,
            total_amount,
            created_at: now,
            cancelled_at: None,
            updated_at: now,
        };
        self.repo.create(&order).await?;
        tracing::info!(
            order_id = %order.id,
            customer_id = %order.customer_id,
            total_amount = order.total_amount,
            "order placed"
        );

        if let Err(e) = self.delivery.open_delivery(&order).await {
            tracing::warn!(order_id = %order.id, error = %e, "opening delivery failed");
        }
        Ok(order)
    }
}

// ── GetOrder ─────────────────────────────────────────────────────────────────

pub struct GetOrderUseCase<R: OrderRepository> {
    pub repo: R,
}

impl<R: OrderRepository> GetOrderUseCase<R> {
    /// Visible to the ordering customer and the fulfilling restaurant.
    pub async fn execute(&self, caller: Uuid, id: Uuid) -> Result<Order, OrdersServiceError> {
        let order = load(&self.repo, id).await?;
        if !order.is_party(caller) {
            return Err(OrdersServiceError::Forbidden);
        }
        Ok(order)
    }
}

// ── ListCustomerOrders ───────────────────────────────────────────────────────

pub struct ListCustomerOrdersUseCase<R: OrderRepository> {
    pub repo: R,
}

impl<R: OrderRepository> ListCustomerOrdersUseCase<R> {
    pub async fn execute(
        &self,
        caller: Uuid,
        customer_id: Uuid,
        page: PageRequest,
    ) -> Result<Vec<Order>, OrdersServiceError> {
        if caller != customer_id {
            return Err(OrdersServiceError::Forbidden);
        }
        self.repo.list_by_customer(customer_id, page.clamped()).await
    }
}

// ── CancelOrder ──────────────────────────────────────────────────────────────

pub struct CancelOrderUseCase<R: OrderRepository, D: DeliveryPort> {
    pub repo: R,
    pub delivery: D,
}

impl<R: OrderRepository, D: DeliveryPort> CancelOrderUseCase<R, D> {
    /// Customers may cancel their own order while it is still PENDING.
    pub async fn execute(&self, caller: Uuid, id: Uuid) -> Result<Order, OrdersServiceError> {
        let current = load(&self.repo, id).await?;
        if current.customer_id != caller {
            return Err(OrdersServiceError::Forbidden);
        }
        if current.status != OrderStatus::Pending {
            return Err(OrdersServiceError::OrderNotCancellable);
        }
        change_status(&self.repo, &self.delivery, current, OrderStatus::Cancelled).await
    }
}

// ── UpdateOrderStatus ────────────────────────────────────────────────────────

pub struct UpdateOrderStatusUseCase<R: OrderRepository, D: DeliveryPort> {
    pub repo: R,
    pub delivery: D,
}

impl<R: OrderRepository, D: DeliveryPort> UpdateOrderStatusUseCase<R, D> {
    /// The fulfilling restaurant moves its order along. Repeating the current status is a no-op.
    pub async fn execute(
        &self,
        caller: Uuid,
        id: Uuid,
        next: OrderStatus,
    ) -> Result<Order, OrdersServiceError> {
        let current = load(&self.repo, id).await?;
        if current.restaurant_id != caller {
            return Err(OrdersServiceError::Forbidden);
        }
        if current.status == next {
            return Ok(current);
        }
        change_status(&self.repo, &self.delivery, current, next).await
    }
}

async fn change_status<R: OrderRepository, D: DeliveryPort>(
    repo: &R,
    delivery: &D,
    current: Order,
    next: OrderStatus,
) -> Result<Order, OrdersServiceError> {
    current.status.transition(next)?;
    let updated = current.advanced(next, Utc::now());

    if !repo
        .compare_and_set(&updated, current.status, current.total_amount)
        .await?
    {
        tracing::info!(order_id = %current.id, from = %current.status, to = %next, "lost status race");
        return Err(OrdersServiceError::StatusConflict);
    }
    tracing::info!(order_id = %updated.id, from = %current.status, to = %next, "order status changed");

    if next == OrderStatus::Cancelled {
        if let Err(e) = delivery.cancel_delivery(updated.id).await {
            tracing::warn!(order_id = %updated.id, error = %e, "cancelling delivery failed");
        }
    }
    Ok(updated)
}

// ── ApplyDiscount ────────────────────────────────────────────────────────────

pub struct ApplyDiscountUseCase<R: OrderRepository> {
    pub repo: R,
}

impl<R: OrderRepository> ApplyDiscountUseCase<R> {
    /// Take `amount` cents off the payable total, never going below zero.
    pub async fn execute(
        &self,
        caller: Uuid,
        id: Uuid,
        amount: i64,
    ) -> Result<Order, OrdersServiceError> {
        if amount < 0 {
            return Err(invalid("discountAmount must not be negative"));
        }
        let current = load(&self.repo, id).await?;
        if current.restaurant_id != caller {
            return Err(OrdersServiceError::Forbidden);
        }
        if current.status.is_terminal() {
            return Err(OrdersServiceError::OrderClosed);
        }

        let updated = current.discounted(amount, Utc::now());
        if !self
            .repo
            .compare_and_set(&updated, current.status, current.total_amount)
            .await?
        {
            tracing::info!(order_id = %current.id, "lost discount race");
            return Err(OrdersServiceError::StatusConflict);
        }
        tracing::info!(
            order_id = %updated.id,
            discount = updated.discount,
            total_amount = updated.total_amount,
            "discount applied"
        );
        Ok(updated)
    }
}
