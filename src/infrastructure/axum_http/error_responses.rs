use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::application::usecases::{
    charges::ChargeError, clients::ClientError, payment_dashboard::PaymentDashboardError,
};

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: u16,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, self.to_string()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::Internal(_) => {
                // Don't leak internal error detail to client
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            code: status.as_u16(),
            message,
        });

        (status, body).into_response()
    }
}

impl From<ChargeError> for AppError {
    fn from(err: ChargeError) -> Self {
        match err {
            ChargeError::InvalidArgument(msg) => AppError::BadRequest(msg),
            ChargeError::ClientNotFound => AppError::NotFound("client not found".to_string()),
            ChargeError::PermissionDenied => {
                AppError::Forbidden("client belongs to another account".to_string())
            }
            ChargeError::Internal(err) => AppError::Internal(err),
        }
    }
}

impl From<ClientError> for AppError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::InvalidArgument(msg) => AppError::BadRequest(msg),
            ClientError::NotFound => AppError::NotFound("client not found".to_string()),
            ClientError::Internal(err) => AppError::Internal(err),
        }
    }
}

impl From<PaymentDashboardError> for AppError {
    fn from(err: PaymentDashboardError) -> Self {
        match err {
            PaymentDashboardError::NotFound => {
                AppError::NotFound("payment not found".to_string())
            }
            PaymentDashboardError::NotPending { current } => {
                AppError::Conflict(format!("payment is not pending (current status: {current})"))
            }
            PaymentDashboardError::Internal(err) => AppError::Internal(err),
        }
    }
}
