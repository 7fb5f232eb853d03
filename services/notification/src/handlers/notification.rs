use std::collections::HashMap;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use nomnom_core::error::AppError;

use crate::state::AppState;
use crate::usecase::notify::{
    BroadcastEmailsUseCase, BroadcastInput, PushUseCase, Recipient, SendEmailUseCase,
    SendSmsUseCase,
};

// ── POST /notifications/push ─────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PushRequest {
    pub user_id: String,
    pub event: String,
    #[serde(default)]
    pub payload: serde_json::Value,
}

#[derive(Serialize)]
pub struct PushResponse {
    pub delivered: bool,
}

pub async fn push(
    State(state): State<AppState>,
    Json(body): Json<PushRequest>,
) -> Result<Json<PushResponse>, AppError> {
    let usecase = PushUseCase {
        connections: state.connections,
    };
    let delivered = usecase.execute(&body.user_id, body.event, body.payload)?;
    Ok(Json(PushResponse { delivered }))
}

// ── GET /notifications/connections/{userId} ──────────────────────────────────

#[derive(Serialize)]
pub struct ConnectionStatusResponse {
    pub connected: bool,
}

pub async fn connection_status(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Json<ConnectionStatusResponse> {
    Json(ConnectionStatusResponse {
        connected: state.connections.is_connected(&user_id),
    })
}

// ── POST /notifications/sms ──────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmsRequest {
    pub phone_number: String,
    pub message: String,
}

pub async fn send_sms(
    State(state): State<AppState>,
    Json(body): Json<SmsRequest>,
) -> Result<StatusCode, AppError> {
    let usecase = SendSmsUseCase { sms: state.sms };
    usecase.execute(&body.phone_number, &body.message).await?;
    Ok(StatusCode::ACCEPTED)
}

// ── POST /notifications/email ────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct EmailRequest {
    pub email: String,
    pub subject: String,
    pub text: String,
}

pub async fn send_email(
    State(state): State<AppState>,
    Json(body): Json<EmailRequest>,
) -> Result<StatusCode, AppError> {
    let usecase = SendEmailUseCase { email: state.email };
    usecase
        .execute(&body.email, &body.subject, &body.text)
        .await?;
    Ok(StatusCode::ACCEPTED)
}

// ── POST /notifications/broadcast-emails ─────────────────────────────────────

#[derive(Deserialize)]
pub struct RecipientRequest {
    pub email: String,
    #[serde(default)]
    pub variables: HashMap<String, String>,
}

#[derive(Deserialize)]
pub struct BroadcastRequest {
    pub subject: String,
    pub template: String,
    pub recipients: Vec<RecipientRequest>,
}

#[derive(Serialize)]
pub struct BroadcastResponse {
    pub sent: usize,
    pub failed: Vec<String>,
}

pub async fn broadcast_emails(
    State(state): State<AppState>,
    Json(body): Json<BroadcastRequest>,
) -> Result<Json<BroadcastResponse>, AppError> {
    let usecase = BroadcastEmailsUseCase { email: state.email };
    let report = usecase
        .execute(BroadcastInput {
            subject: body.subject,
            template: body.template,
            recipients: body
                .recipients
                .into_iter()
                .map(|r| Recipient {
                    email: r.email,
                    variables: r.variables,
                })
                .collect(),
        })
        .await?;
    Ok(Json(BroadcastResponse {
        sent: report.sent,
        failed: report.failed,
    }))
}
