//! JSON error responses

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::fmt;
use trafficwatch_simulator::SimulatorError;

/// Error returned by the JSON API
#[derive(Debug)]
pub struct ApiError {
    /// Error message
    pub message: String,
    /// HTTP status code
    pub status: StatusCode,
    /// Error code for API responses
    pub code: &'static str,
}

impl ApiError {
    /// Create a new API error
    pub fn new(message: impl Into<String>, status: StatusCode, code: &'static str) -> Self {
        Self {
            message: message.into(),
            status,
            code,
        }
    }

    /// Create a bad request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(message, StatusCode::BAD_REQUEST, "BAD_REQUEST")
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(message, StatusCode::NOT_FOUND, "NOT_FOUND")
    }

    /// Create an internal server error
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(message, StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

impl From<trafficwatch_core::Error> for ApiError {
    fn from(err: trafficwatch_core::Error) -> Self {
        match &err {
            trafficwatch_core::Error::Validation { .. } => Self::new(
                err.user_message(),
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
            ),
            trafficwatch_core::Error::Configuration { .. } => Self::internal_error(err.to_string()),
        }
    }
}

impl From<SimulatorError> for ApiError {
    fn from(err: SimulatorError) -> Self {
        match err {
            SimulatorError::Core(core) => core.into(),
            other => Self::new(
                other.to_string(),
                StatusCode::INTERNAL_SERVER_ERROR,
                "ANALYSIS_FAILED",
            ),
        }
    }
}

/// Error body
#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    /// Always false
    pub success: bool,
    /// Error message
    pub error: String,
    /// Error code
    pub code: &'static str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiErrorResponse {
            success: false,
            error: self.message,
            code: self.code,
        };

        (self.status, Json(body)).into_response()
    }
}
