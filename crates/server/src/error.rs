//! Unified error handling for the telemetry server.
//!
//! Provides an `AppError` type that logs the failure and responds with the
//! wire failure envelope. Route handlers return `Result<T, AppError>`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::persister::PersistError;

/// Application-level error type for the telemetry server.
#[derive(Debug, Error)]
pub enum AppError {
    /// Event could not be written durably.
    #[error("persistence error: {0}")]
    Persist(#[from] PersistError),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Wire failure envelope: `{ success: false, message, error }`.
#[derive(Debug, Serialize)]
struct ErrorBody {
    success: bool,
    message: String,
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "request failed");

        let message = match &self {
            Self::Persist(_) => "Failed to log event",
            Self::Internal(_) => "Internal server error",
        };

        let body = ErrorBody {
            success: false,
            message: message.to_string(),
            error: self.to_string(),
        };

        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::Internal("worker vanished".to_string());
        assert_eq!(err.to_string(), "internal error: worker vanished");
    }

    #[test]
    fn test_app_error_status_code() {
        let response = AppError::Internal("x".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
