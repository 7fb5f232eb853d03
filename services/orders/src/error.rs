use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use nomnom_domain::order::OrderTransitionError;

/// Orders service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum OrdersServiceError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("not allowed to access this order")]
    Forbidden,
    #[error("order not found")]
    OrderNotFound,
    #[error("only pending orders can be cancelled")]
    OrderNotCancellable,
    #[error("order is already closed")]
    OrderClosed,
    #[error(transparent)]
    InvalidStatusTransition(#[from] OrderTransitionError),
    #[error("order changed concurrently")]
    StatusConflict,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl OrdersServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidRequest(_) => "INVALID_REQUEST",
            Self::Forbidden => "FORBIDDEN",
            Self::OrderNotFound => "ORDER_NOT_FOUND",
            Self::OrderNotCancellable => "ORDER_NOT_CANCELLABLE",
            Self::OrderClosed => "ORDER_CLOSED",
            Self::InvalidStatusTransition(_) => "INVALID_STATUS_TRANSITION",
            Self::StatusConflict => "STATUS_CONFLICT",
            Self::Internal(_) => "INTERNAL",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::OrderNotFound => StatusCode::NOT_FOUND,
            Self::OrderNotCancellable
            | Self::OrderClosed
            | Self::InvalidStatusTransition(_)
            | Self::StatusConflict => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for OrdersServiceError {
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
