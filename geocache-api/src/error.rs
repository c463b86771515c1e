//! API error handling.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use geocache_core::error::GeocacheError;
use serde::Serialize;

/// API error type.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    code: String,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(status: StatusCode, message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            code: code.into(),
        }
    }

    /// Bad request error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message, "BAD_REQUEST")
    }

    /// Not found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message, "NOT_FOUND")
    }

    /// Upstream provider error.
    pub fn bad_gateway(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_GATEWAY, message, "PROVIDER_ERROR")
    }

    /// Internal server error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message, "INTERNAL_ERROR")
    }

    /// Returns the HTTP status.
    pub fn status(&self) -> StatusCode {
        self.status
    }
}

/// Error response body.
#[derive(Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Serialize)]
struct ErrorBody {
    code: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.code,
                message: self.message,
            },
        };

        (self.status, Json(body)).into_response()
    }
}

impl From<GeocacheError> for ApiError {
    fn from(err: GeocacheError) -> Self {
        match &err {
            e if e.is_validation_error() => ApiError::bad_request(err.to_string()),
            GeocacheError::NoResults(_) => ApiError::not_found(err.to_string()),
            GeocacheError::HttpError(_)
            | GeocacheError::ConnectionTimeout(_)
            | GeocacheError::ProviderError { .. }
            | GeocacheError::JsonError(_) => {
                tracing::warn!(error = %err, "Geocoding provider failed");
                ApiError::bad_gateway(err.to_string())
            }
            e if e.is_cache_error() => {
                tracing::error!(error = %err, "Cache store fault");
                ApiError::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred",
                    "CACHE_ERROR",
                )
            }
            _ => {
                tracing::error!(error = %err, "Internal error");
                ApiError::internal("An internal error occurred")
            }
        }
    }
}
