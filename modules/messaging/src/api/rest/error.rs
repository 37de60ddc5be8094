use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// Standard API error envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Error message
    pub error: String,
    /// HTTP status code
    pub code: u16,
    /// RFC3339 timestamp when the error occurred
    pub timestamp: String,
}

/// A request-scoped failure carrying the status and the wire envelope
#[derive(Debug, Clone)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorBody,
}

impl ApiError {
    pub fn new(status: StatusCode, error: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorBody {
                error: error.into(),
                code: status.as_u16(),
                timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            },
        }
    }

    pub fn missing_fields() -> Self {
        Self::new(StatusCode::BAD_REQUEST, "Missing required fields")
    }

    pub fn missing_credentials() -> Self {
        Self::new(StatusCode::BAD_REQUEST, "Missing email or password")
    }

    pub fn missing_user_id() -> Self {
        Self::new(StatusCode::BAD_REQUEST, "Missing userId parameter")
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.body.error
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// Map domain errors onto the wire envelope. The messages are fixed strings;
/// details stay in the logs.
pub fn map_domain_error(error: &DomainError) -> ApiError {
    match error {
        DomainError::EmailAlreadyExists { .. } => {
            ApiError::new(StatusCode::CONFLICT, "User already exists")
        }
        DomainError::InvalidCredentials => {
            ApiError::new(StatusCode::UNAUTHORIZED, "Invalid credentials")
        }
        DomainError::Storage { .. } => {
            ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
        }
    }
}
