use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use nomnom_domain::delivery::DeliveryStatus;
use nomnom_domain::pagination::PageRequest;

use crate::domain::types::{Delivery, DeliveryFilter, DeliveryRef};
use crate::error::DeliveryServiceError;
use crate::state::AppState;
use crate::usecase::delivery::{
    CreateDeliveryInput, CreateDeliveryUseCase, GetDeliveryUseCase, ListDeliveriesUseCase,
    UpdateDeliveryStatusUseCase,
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryResponse {
    pub id: String,
    pub order_id: String,
    pub customer_id: String,
    pub restaurant_id: Option<String>,
    pub driver_id: Option<String>,
    pub pickup_address: Option<String>,
    pub dropoff_address: Option<String>,
    pub status: DeliveryStatus,
    #[serde(serialize_with = "nomnom_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "nomnom_core::serde::to_rfc3339_ms_opt")]
    pub accepted_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(serialize_with = "nomnom_core::serde::to_rfc3339_ms_opt")]
    pub picked_up_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(serialize_with = "nomnom_core::serde::to_rfc3339_ms_opt")]
    pub delivered_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(serialize_with = "nomnom_core::serde::to_rfc3339_ms_opt")]
    pub cancelled_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(serialize_with = "nomnom_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Delivery> for DeliveryResponse {
    fn from(d: Delivery) -> Self {
        Self {
            id: d.id.to_string(),
            order_id: d.order_id,
            customer_id: d.customer_id.to_string(),
            restaurant_id: d.restaurant_id.map(|id| id.to_string()),
            driver_id: d.driver_id.map(|id| id.to_string()),
            pickup_address: d.pickup_address,
            dropoff_address: d.dropoff_address,
            status: d.status,
            created_at: d.created_at,
            accepted_at: d.accepted_at,
            picked_up_at: d.picked_up_at,
            delivered_at: d.delivered_at,
            cancelled_at: d.cancelled_at,
            updated_at: d.updated_at,
        }
    }
}

// ── POST /orders ─────────────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDeliveryRequest {
    pub order_id: String,
    pub customer_id: Uuid,
    pub restaurant_id: Option<Uuid>,
    pub customer_phone: Option<String>,
    pub customer_email: Option<String>,
    pub pickup_address: Option<String>,
    pub dropoff_address: Option<String>,
}

pub async fn create_delivery(
    State(state): State<AppState>,
    Json(body): Json<CreateDeliveryRequest>,
) -> Result<(StatusCode, Json<DeliveryResponse>), DeliveryServiceError> {
    let usecase = CreateDeliveryUseCase {
        repo: state.delivery_repo(),
        notifier: state.notifier.clone(),
    };
    let delivery = usecase
        .execute(CreateDeliveryInput {
            order_id: body.order_id,
            customer_id: body.customer_id,
            restaurant_id: body.restaurant_id,
            customer_phone: body.customer_phone,
            customer_email: body.customer_email,
            pickup_address: body.pickup_address,
            dropoff_address: body.dropoff_address,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(delivery.into())))
}

// ── PUT /orders/{orderId}/status, PUT /deliveries/{id}/status ────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusRequest {
    pub status: DeliveryStatus,
    pub driver_id: Option<Uuid>,
}

async fn update_status(
    state: AppState,
    target: DeliveryRef,
    next: DeliveryStatus,
    driver_id: Option<Uuid>,
) -> Result<Json<DeliveryResponse>, DeliveryServiceError> {
    let usecase = UpdateDeliveryStatusUseCase {
        deliveries: state.delivery_repo(),
        applications: state.application_repo(),
        notifier: state.notifier.clone(),
    };
    let delivery = usecase.execute(target, next, driver_id).await?;
    Ok(Json(delivery.into()))
}

pub async fn update_order_status(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
    Json(body): Json<UpdateStatusRequest>,
) -> Result<Json<DeliveryResponse>, DeliveryServiceError> {
    update_status(state, DeliveryRef::Order(order_id), body.status, body.driver_id).await
}

pub async fn update_delivery_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateStatusRequest>,
) -> Result<Json<DeliveryResponse>, DeliveryServiceError> {
    update_status(state, DeliveryRef::Id(id), body.status, body.driver_id).await
}

// ── POST /drivers/allocate ───────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocateRequest {
    pub delivery_id: Uuid,
    pub driver_id: Uuid,
}

pub async fn allocate_driver(
    State(state): State<AppState>,
    Json(body): Json<AllocateRequest>,
) -> Result<Json<DeliveryResponse>, DeliveryServiceError> {
    update_status(
        state,
        DeliveryRef::Id(body.delivery_id),
        DeliveryStatus::Accepted,
        Some(body.driver_id),
    )
    .await
}

// ── GET /deliveries/{id} ─────────────────────────────────────────────────────

pub async fn get_delivery(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeliveryResponse>, DeliveryServiceError> {
    let usecase = GetDeliveryUseCase {
        repo: state.delivery_repo(),
    };
    Ok(Json(usecase.execute(DeliveryRef::Id(id)).await?.into()))
}

// ── GET /orders/{orderId}/delivery ───────────────────────────────────────────

pub async fn get_order_delivery(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
) -> Result<Json<DeliveryResponse>, DeliveryServiceError> {
    let usecase = GetDeliveryUseCase {
        repo: state.delivery_repo(),
    };
    Ok(Json(usecase.execute(DeliveryRef::Order(order_id)).await?.into()))
}

// ── GET /deliveries ──────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
pub struct ListDeliveriesQuery {
    #[serde(rename = "driverId")]
    pub driver_id: Option<Uuid>,
    pub status: Option<DeliveryStatus>,
    pub page: Option<u32>,
    #[serde(rename = "per-page")]
    pub per_page: Option<u32>,
}

impl ListDeliveriesQuery {
    fn page_request(&self) -> PageRequest {
        let default = PageRequest::default();
        PageRequest {
            per_page: self.per_page.unwrap_or(default.per_page),
            page: self.page.unwrap_or(default.page),
        }
    }
}

async fn list(
    state: AppState,
    filter: DeliveryFilter,
    page: PageRequest,
) -> Result<Json<Vec<DeliveryResponse>>, DeliveryServiceError> {
    let usecase = ListDeliveriesUseCase {
        repo: state.delivery_repo(),
    };
    let deliveries = usecase.execute(filter, page).await?;
    Ok(Json(deliveries.into_iter().map(Into::into).collect()))
}

pub async fn list_deliveries(
    State(state): State<AppState>,
    Query(query): Query<ListDeliveriesQuery>,
) -> Result<Json<Vec<DeliveryResponse>>, DeliveryServiceError> {
    let filter = DeliveryFilter {
        driver_id: query.driver_id,
        status: query.status,
    };
    list(state, filter, query.page_request()).await
}

// ── GET /deliveries/pending ──────────────────────────────────────────────────

pub async fn list_pending_deliveries(
    State(state): State<AppState>,
    Query(query): Query<ListDeliveriesQuery>,
) -> Result<Json<Vec<DeliveryResponse>>, DeliveryServiceError> {
    let filter = DeliveryFilter {
        driver_id: None,
        status: Some(DeliveryStatus::Pending),
    };
    list(state, filter, query.page_request()).await
}
