use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use nomnom_auth_types::identity::IdentityHeaders;
use nomnom_domain::order::{OrderStatus, PaymentType, PortionSize};
use nomnom_domain::pagination::PageRequest;
use nomnom_domain::user::UserType;

use crate::domain::types::{Order, OrderItem};
use crate::error::OrdersServiceError;
use crate::state::AppState;
use crate::usecase::order::{
    ApplyDiscountUseCase, CancelOrderUseCase, CartItemInput, CreateOrderInput, CreateOrderUseCase,
    GetOrderUseCase, ListCustomerOrdersUseCase, UpdateOrderStatusUseCase,
};

fn require_role(identity: &IdentityHeaders, role: UserType) -> Result<(), OrdersServiceError> {
    if identity.user_type != role {
        return Err(OrdersServiceError::Forbidden);
    }
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemResponse {
    pub item_id: String,
    pub item_name: String,
    pub quantity: i32,
    pub portion_size: PortionSize,
    pub unit_price: i64,
    pub line_total: i64,
    pub image: Option<String>,
}

impl From<OrderItem> for OrderItemResponse {
    fn from(item: OrderItem) -> Self {
        Self {
            item_id: item.item_id,
            item_name: item.item_name,
            quantity: item.quantity,
            portion_size: item.portion_size,
            unit_price: item.unit_price,
            line_total: item.line_total,
            image: item.image,
        }
    }
}

/// Money fields are integer cents.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub id: String,
    pub customer_id: String,
    pub restaurant_id: String,
    pub customer_name: String,
    pub customer_contact: Option<String>,
    pub delivery_address: String,
    pub payment_type: PaymentType,
    pub status: OrderStatus,
    pub items: Vec<OrderItemResponse>,
    pub order_total: i64,
    pub delivery_fee: i64,
    pub discount: i64,
    pub total_amount: i64,
    #[serde(serialize_with = "nomnom_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "nomnom_core::serde::to_rfc3339_ms_opt")]
    pub cancelled_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(serialize_with = "nomnom_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Order> for OrderResponse {
    fn from(o: Order) -> Self {
        Self {
            id: o.id.to_string(),
            customer_id: o.customer_id.to_string(),
            restaurant_id: o.restaurant_id.to_string(),
            customer_name: o.customer_name,
            customer_contact: o.customer_contact,
            delivery_address: o.delivery_address,
            payment_type: o.payment_type,
            status: o.status,
            items: o.items.into_iter().map(Into::into).collect(),
            order_total: o.order_total,
            delivery_fee: o.delivery_fee,
            discount: o.discount,
            total_amount: o.total_amount,
            created_at: o.created_at,
            cancelled_at: o.cancelled_at,
            updated_at: o.updated_at,
        }
    }
}

// ── POST /api/orders ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemRequest {
    pub item_id: String,
    pub item_name: String,
    pub quantity: i32,
    pub portion_size: Option<PortionSize>,
    pub unit_price: i64,
    pub image: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub restaurant_id: Uuid,
    pub customer_name: String,
    pub customer_contact: Option<String>,
    pub delivery_address: String,
    pub payment_type: PaymentType,
    pub items: Vec<CartItemRequest>,
}

pub async fn create_order(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Json(body): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<OrderResponse>), OrdersServiceError> {
    require_role(&identity, UserType::Customer)?;
    let usecase = CreateOrderUseCase {
        repo: state.order_repo(),
        delivery: state.delivery.clone(),
    };
    let items = body
        .items
        .into_iter()
        .map(|i| CartItemInput {
            item_id: i.item_id,
            item_name: i.item_name,
            quantity: i.quantity,
            portion_size: i.portion_size,
            unit_price: i.unit_price,
            image: i.image,
        })
        .collect();
    let order = usecase
        .execute(CreateOrderInput {
            customer_id: identity.user_id,
            restaurant_id: body.restaurant_id,
            customer_name: body.customer_name,
            customer_contact: body.customer_contact,
            delivery_address: body.delivery_address,
            payment_type: body.payment_type,
            items,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(order.into())))
}

// ── GET /api/orders/{id} ─────────────────────────────────────────────────────

pub async fn get_order(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<OrderResponse>, OrdersServiceError> {
    let usecase = GetOrderUseCase {
        repo: state.order_repo(),
    };
    Ok(Json(usecase.execute(identity.user_id, id).await?.into()))
}

// ── GET /api/orders/customer/{customerId} ────────────────────────────────────

pub async fn list_customer_orders(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(customer_id): Path<Uuid>,
    Query(page): Query<PageRequest>,
) -> Result<Json<Vec<OrderResponse>>, OrdersServiceError> {
    let usecase = ListCustomerOrdersUseCase {
        repo: state.order_repo(),
    };
    let orders = usecase.execute(identity.user_id, customer_id, page).await?;
    Ok(Json(orders.into_iter().map(Into::into).collect()))
}

// ── POST /api/orders/{id}/cancel ─────────────────────────────────────────────

pub async fn cancel_order(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<OrderResponse>, OrdersServiceError> {
    let usecase = CancelOrderUseCase {
        repo: state.order_repo(),
        delivery: state.delivery.clone(),
    };
    Ok(Json(usecase.execute(identity.user_id, id).await?.into()))
}

// ── POST /api/orders/{id}/discount ───────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountRequest {
    pub discount_amount: i64,
}

pub async fn apply_discount(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<DiscountRequest>,
) -> Result<Json<OrderResponse>, OrdersServiceError> {
    require_role(&identity, UserType::Restaurant)?;
    let usecase = ApplyDiscountUseCase {
        repo: state.order_repo(),
    };
    let order = usecase
        .execute(identity.user_id, id, body.discount_amount)
        .await?;
    Ok(Json(order.into()))
}

// ── PUT /api/orders/{id}/status ──────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateStatusRequest {
    pub status: OrderStatus,
}

pub async fn update_order_status(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateStatusRequest>,
) -> Result<Json<OrderResponse>, OrdersServiceError> {
    require_role(&identity, UserType::Restaurant)?;
    let usecase = UpdateOrderStatusUseCase {
        repo: state.order_repo(),
        delivery: state.delivery.clone(),
    };
    let order = usecase.execute(identity.user_id, id, body.status).await?;
    Ok(Json(order.into()))
}
