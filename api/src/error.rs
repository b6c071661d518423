//! Unified error types for the LDES Navigator API
//!
//! This module defines error types for each layer:
//! - `DomainError`: Catalog and registry rule violations
//! - `FetchError`: Upstream HTTP errors (catalog config, feed probes)
//! - `AppError`: Application layer errors (wraps the others for HTTP responses)

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Domain layer errors - pure business logic errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Errors from fetching upstream resources
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Upstream returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Invalid catalog payload: {0}")]
    InvalidPayload(String),

    #[error("Catalog payload contained no valid urls")]
    EmptyCatalog,
}

/// Application layer errors - used by HTTP handlers
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),
}

/// Error response body for JSON responses
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl AppError {
    fn parts(&self) -> (StatusCode, &'static str, Option<String>) {
        match self {
            AppError::Domain(DomainError::NotFound(msg)) => {
                (StatusCode::NOT_FOUND, "Not found", Some(msg.clone()))
            }
            AppError::Domain(DomainError::Validation(msg)) => (
                StatusCode::BAD_REQUEST,
                "Validation error",
                Some(msg.clone()),
            ),
            AppError::Domain(DomainError::Conflict(msg)) => {
                (StatusCode::CONFLICT, "Conflict", Some(msg.clone()))
            }
            AppError::Domain(DomainError::Internal(msg)) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                    None,
                )
            }
            AppError::Fetch(e) => {
                tracing::error!("Fetch error: {}", e);
                match e {
                    FetchError::Status { status, message } => {
                        let http_status = if *status == 404 {
                            StatusCode::NOT_FOUND
                        } else {
                            StatusCode::BAD_GATEWAY
                        };
                        (http_status, "Upstream error", Some(message.clone()))
                    }
                    _ => (StatusCode::BAD_GATEWAY, "Upstream error", None),
                }
            }
        }
    }

    #[cfg(test)]
    pub fn status(&self) -> StatusCode {
        self.parts().0
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = self.parts();

        let body = Json(ErrorResponse {
            error: error.to_string(),
            details,
        });

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflict_maps_to_409() {
        let err = AppError::from(DomainError::Conflict("refresh in flight".to_string()));
        assert_eq!(err.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn validation_maps_to_400() {
        let err = AppError::from(DomainError::Validation("empty url".to_string()));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn upstream_status_maps_to_bad_gateway() {
        let err = AppError::from(FetchError::Status {
            status: 500,
            message: "boom".to_string(),
        });
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);

        let err = AppError::from(FetchError::Status {
            status: 404,
            message: "gone".to_string(),
        });
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn empty_catalog_message() {
        assert_eq!(
            FetchError::EmptyCatalog.to_string(),
            "Catalog payload contained no valid urls"
        );
    }
}
