use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};
use uuid::Uuid;

pub type Result<T> = std::result::Result<T, ApiError>;

/// Error body sent to clients: `{"success": false, "message": "..."}`
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Insufficient stock for {medication}")]
    InsufficientStock { medication: String },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Helper: validation failure for a required or malformed field
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation(message.into())
    }

    /// Helper: resource not found
    pub fn not_found(resource: &str) -> Self {
        ApiError::NotFound(format!("{} not found", resource))
    }

    /// Helper: an order line exceeded available stock
    pub fn insufficient_stock(medication: impl Into<String>) -> Self {
        ApiError::InsufficientStock {
            medication: medication.into(),
        }
    }

    /// Get status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_)
            | ApiError::BadRequest(_)
            | ApiError::InsufficientStock { .. } => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Database(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to expose to clients. Server-side failures get a generic
    /// body; the detail goes to the log.
    fn client_message(&self) -> String {
        match self {
            ApiError::Database(_) | ApiError::Internal(_) => {
                "An internal server error occurred".to_string()
            }
            other => other.to_string(),
        }
    }

    /// Log error with appropriate level
    fn log_error(&self, request_id: &str) {
        match self.status_code() {
            status if status.is_server_error() => {
                error!(
                    request_id = %request_id,
                    error = %self,
                    "Server error occurred"
                );
            }
            status if status.is_client_error() => {
                warn!(
                    request_id = %request_id,
                    error = %self,
                    "Client error occurred"
                );
            }
            _ => {}
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let request_id = Uuid::new_v4().to_string();
        self.log_error(&request_id);

        let body = ErrorResponse {
            success: false,
            message: self.client_message(),
        };

        (self.status_code(), Json(body)).into_response()
    }
}
