//! API error handling

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use core_kernel::PortError;
use domain_client::ClientError;
use infra_export::UploadError;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Conflict(String),

    /// No Drive credentials are stored yet
    #[error("{0}")]
    DriveNotAuthorized(String),

    /// The OAuth client id or secret is missing
    #[error("OAuth client not configured. Set GOOGLE_CLIENT_ID and GOOGLE_CLIENT_SECRET")]
    DriveNotConfigured,

    /// Every upload attempt failed
    #[error("Drive upload failed after retries")]
    UploadFailed(String),

    #[error("{0}")]
    Internal(String),

    #[error("{0}")]
    Database(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Status code and machine-readable code for this error
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            ApiError::Validation(_) => (StatusCode::BAD_REQUEST, "validation_error"),
            ApiError::Conflict(_) => (StatusCode::CONFLICT, "conflict"),
            ApiError::DriveNotAuthorized(_) => (StatusCode::BAD_REQUEST, "not_authorized"),
            ApiError::DriveNotConfigured => (StatusCode::INTERNAL_SERVER_ERROR, "not_configured"),
            ApiError::UploadFailed(_) => (StatusCode::INTERNAL_SERVER_ERROR, "upload_failed"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
            ApiError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, "database_error"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        if status.is_server_error() {
            error!(code, error = %self, "request failed");
        }

        let details = match &self {
            ApiError::UploadFailed(details) => Some(details.clone()),
            _ => None,
        };
        let body = ErrorResponse {
            error: self.to_string(),
            code: code.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PortError> for ApiError {
    fn from(err: PortError) -> Self {
        match err {
            PortError::NotFound { entity_type, .. } => {
                ApiError::NotFound(format!("{} not found", entity_type))
            }
            PortError::Validation { message, .. } => ApiError::Validation(message),
            PortError::Conflict { message } => ApiError::Conflict(message),
            PortError::Connection { message, .. } => ApiError::Database(message),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<ClientError> for ApiError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Validation(_) | ClientError::Claim(_) => ApiError::Validation(err.to_string()),
            ClientError::Port(port) => port.into(),
        }
    }
}

impl From<UploadError> for ApiError {
    fn from(err: UploadError) -> Self {
        match err {
            UploadError::NotAuthorized => ApiError::DriveNotAuthorized(err.to_string()),
            UploadError::NotConfigured => ApiError::DriveNotConfigured,
            UploadError::Exhausted { message, .. } => ApiError::UploadFailed(message),
            other => ApiError::Internal(other.to_string()),
        }
    }
}
