//! HTTP error handling and response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::db::repository::RepositoryError;

/// Message returned for every 500; the cause is only logged.
const INTERNAL_ERROR_MESSAGE: &str = "An internal server error occurred";

/// API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Resource not found
    NotFound(String),
    /// Error raised by the index service or a collaborator
    Repository(RepositoryError),
}

impl AppError {
    /// HTTP status this error maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Repository(e) => match e {
                RepositoryError::NotFound { .. } => StatusCode::NOT_FOUND,
                RepositoryError::ValidationError { .. } => StatusCode::BAD_REQUEST,
                RepositoryError::Conflict { .. } => StatusCode::CONFLICT,
                RepositoryError::IndexError { .. }
                | RepositoryError::ConfigurationError { .. }
                | RepositoryError::InternalError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error = match self {
            AppError::NotFound(msg) => ApiError::new("NOT_FOUND", msg),
            AppError::Repository(e) => match status {
                StatusCode::NOT_FOUND => ApiError::new("NOT_FOUND", e.message()),
                StatusCode::BAD_REQUEST => {
                    let api_error = ApiError::new("BAD_REQUEST", e.message());
                    match e.context().details.clone() {
                        Some(details) => api_error.with_details(details),
                        None => api_error,
                    }
                }
                StatusCode::CONFLICT => ApiError::new("CONFLICT", e.message()),
                _ => {
                    error!(context = %e.context(), "Request failed: {:?}", e);
                    ApiError::new("INTERNAL_ERROR", INTERNAL_ERROR_MESSAGE)
                }
            },
        };

        (status, Json(error)).into_response()
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        AppError::Repository(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_errors_map_to_statuses() {
        let cases = [
            (RepositoryError::not_found("x"), StatusCode::NOT_FOUND),
            (RepositoryError::validation("x"), StatusCode::BAD_REQUEST),
            (RepositoryError::conflict("x"), StatusCode::CONFLICT),
            (RepositoryError::index("x"), StatusCode::INTERNAL_SERVER_ERROR),
            (RepositoryError::internal("x"), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, expected) in cases {
            assert_eq!(AppError::from(err).status(), expected);
        }
    }

    #[test]
    fn test_handler_not_found_is_404() {
        let err = AppError::NotFound("Group editors does not exist.".to_string());
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_internal_errors_hide_details() {
        let response = AppError::from(RepositoryError::index("shard 3 timed out")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
