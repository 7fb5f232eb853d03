use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use nomnom_domain::delivery::DriverApplicationStatus;

use crate::domain::types::DriverApplication;
use crate::error::DeliveryServiceError;
use crate::state::AppState;
use crate::usecase::driver::{
    ApplyDriverInput, ApplyDriverUseCase, DecideDriverApplicationUseCase,
    GetDriverApplicationUseCase,
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverApplicationResponse {
    pub user_id: String,
    pub vehicle_number: String,
    pub vehicle_type_id: i64,
    pub license_number: String,
    pub status: DriverApplicationStatus,
    #[serde(serialize_with = "nomnom_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "nomnom_core::serde::to_rfc3339_ms_opt")]
    pub decided_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl From<DriverApplication> for DriverApplicationResponse {
    fn from(a: DriverApplication) -> Self {
        Self {
            user_id: a.user_id.to_string(),
            vehicle_number: a.vehicle_number,
            vehicle_type_id: a.vehicle_type_id,
            license_number: a.license_number,
            status: a.status,
            created_at: a.created_at,
            decided_at: a.decided_at,
        }
    }
}

// ── POST /drivers/apply ──────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyRequest {
    pub user_id: Uuid,
    pub vehicle_number: String,
    pub vehicle_type_id: i64,
    pub license_number: String,
    pub phone: Option<String>,
    pub email: Option<String>,
}

pub async fn apply(
    State(state): State<AppState>,
    Json(body): Json<ApplyRequest>,
) -> Result<(StatusCode, Json<DriverApplicationResponse>), DeliveryServiceError> {
    let usecase = ApplyDriverUseCase {
        applications: state.application_repo(),
    };
    let application = usecase
        .execute(ApplyDriverInput {
            user_id: body.user_id,
            vehicle_number: body.vehicle_number,
            vehicle_type_id: body.vehicle_type_id,
            license_number: body.license_number,
            phone: body.phone,
            email: body.email,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(application.into())))
}

// ── PUT /drivers/application/{userId}/status ─────────────────────────────────

#[derive(Deserialize)]
pub struct DecideRequest {
    pub status: DriverApplicationStatus,
}

pub async fn decide_application(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(body): Json<DecideRequest>,
) -> Result<Json<DriverApplicationResponse>, DeliveryServiceError> {
    let usecase = DecideDriverApplicationUseCase {
        applications: state.application_repo(),
        notifier: state.notifier.clone(),
    };
    let application = usecase.execute(user_id, body.status).await?;
    Ok(Json(application.into()))
}

// ── GET /drivers/application/{userId} ────────────────────────────────────────

pub async fn get_application(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<DriverApplicationResponse>, DeliveryServiceError> {
    let usecase = GetDriverApplicationUseCase {
        applications: state.application_repo(),
    };
    Ok(Json(usecase.execute(user_id).await?.into()))
}
