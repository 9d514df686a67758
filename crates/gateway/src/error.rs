//! Error types for the gateway layer

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use messages_domain::MessageError;
use serde::Serialize;
use thiserror::Error;
use tracing::warn;
use utoipa::ToSchema;

/// Gateway error types
#[derive(Error, Debug)]
pub enum GatewayError {
    /// The request could not be parsed
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The request parsed but the message it describes is invalid
    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),
}

impl GatewayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::InvalidRequest(_) | GatewayError::ValidationFailed(_) => {
                StatusCode::BAD_REQUEST
            }
            GatewayError::StorageUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

/// JSON body returned for every failed request
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            warn!(status = %status, error = %self, "request failed");
        }

        let body = ErrorResponse {
            error: status.as_str().to_string(),
            message: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for gateway operations
pub type GatewayResult<T> = Result<T, GatewayError>;

impl From<MessageError> for GatewayError {
    fn from(error: MessageError) -> Self {
        match error {
            MessageError::Validation { message } => GatewayError::ValidationFailed(message),
            MessageError::Storage { message } => GatewayError::StorageUnavailable(message),
        }
    }
}

impl From<JsonRejection> for GatewayError {
    fn from(rejection: JsonRejection) -> Self {
        GatewayError::InvalidRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for GatewayError {
    fn from(rejection: QueryRejection) -> Self {
        GatewayError::InvalidRequest(rejection.body_text())
    }
}
