use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use nomnom_domain::delivery::TransitionError;

/// Delivery service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum DeliveryServiceError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("driver id is required to accept a delivery")]
    DriverRequired,
    #[error("driver is not approved")]
    DriverNotApproved,
    #[error("delivery not found")]
    DeliveryNotFound,
    #[error("driver application not found")]
    ApplicationNotFound,
    #[error("delivery already exists for this order")]
    DeliveryAlreadyExists,
    #[error("delivery already assigned to another driver")]
    DeliveryAlreadyAssigned,
    #[error(transparent)]
    InvalidStatusTransition(#[from] TransitionError),
    #[error("delivery status changed concurrently")]
    StatusConflict,
    #[error("driver application already exists")]
    ApplicationAlreadyExists,
    #[error("driver application already decided")]
    ApplicationAlreadyDecided,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl DeliveryServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidRequest(_) => "INVALID_REQUEST",
            Self::DriverRequired => "DRIVER_REQUIRED",
            Self::DriverNotApproved => "DRIVER_NOT_APPROVED",
            Self::DeliveryNotFound => "DELIVERY_NOT_FOUND",
            Self::ApplicationNotFound => "APPLICATION_NOT_FOUND",
            Self::DeliveryAlreadyExists => "DELIVERY_ALREADY_EXISTS",
            Self::DeliveryAlreadyAssigned => "DELIVERY_ALREADY_ASSIGNED",
            Self::InvalidStatusTransition(_) => "INVALID_STATUS_TRANSITION",
            Self::StatusConflict => "STATUS_CONFLICT",
            Self::ApplicationAlreadyExists => "APPLICATION_ALREADY_EXISTS",
            Self::ApplicationAlreadyDecided => "APPLICATION_ALREADY_DECIDED",
            Self::Internal(_) => "INTERNAL",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) | Self::DriverRequired => StatusCode::BAD_REQUEST,
            Self::DriverNotApproved => StatusCode::FORBIDDEN,
            Self::DeliveryNotFound | Self::ApplicationNotFound => StatusCode::NOT_FOUND,
            Self::DeliveryAlreadyExists
            | Self::DeliveryAlreadyAssigned
            | Self::InvalidStatusTransition(_)
            | Self::StatusConflict
            | Self::ApplicationAlreadyExists
            | Self::ApplicationAlreadyDecided => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for DeliveryServiceError {
    fn into_response(self) -> Response {
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (self.status(), axum::Json(body)).into_response()
    }
}
