//! Unified error handling for route handlers.
//!
//! The context pipeline itself is fail-open and never surfaces errors to the
//! transport; `AppError` exists for the thin handler layer on top of it.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::services::ServiceError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// A collaborator call failed.
    #[error("Service error: {0}")]
    Service(#[from] ServiceError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The request reached a handler without an assembled context.
    #[error("Missing request context")]
    MissingContext,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if matches!(self, Self::Service(_) | Self::MissingContext) {
            tracing::error!(error = %self, "Request error");
        }

        let status = match &self {
            Self::Service(_) => StatusCode::BAD_GATEWAY,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::MissingContext => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Service(_) => "External service error".to_string(),
            Self::MissingContext => "Internal server error".to_string(),
            Self::NotFound(_) => self.to_string(),
        };

        (status, message).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("store ACME".to_string());
        assert_eq!(err.to_string(), "Not found: store ACME");
    }

    #[test]
    fn test_app_error_status_codes() {
        fn get_status(err: AppError) -> StatusCode {
            err.into_response().status()
        }

        assert_eq!(
            get_status(AppError::NotFound("test".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::MissingContext),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            get_status(AppError::Service(ServiceError::Backend(
                "down".to_string()
            ))),
            StatusCode::BAD_GATEWAY
        );
    }
}
