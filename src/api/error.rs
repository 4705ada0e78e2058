//! Mapping from domain errors to HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::warn;
use utoipa::ToSchema;

use crate::error::{FieldError, StoreError, ValidationError};
use crate::metrics;

/// `{"detail": "..."}` error body.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorDetail {
    /// Error message.
    pub detail: String,
}

/// `{"detail": [FieldError, ...]}` validation error body.
#[derive(Debug, Serialize, ToSchema)]
pub struct ValidationDetail {
    /// Every field that failed validation.
    pub detail: Vec<FieldError>,
}

/// Errors a handler can return.
#[derive(Debug)]
pub enum ApiError {
    /// Item lookup failed.
    Store(StoreError),
    /// Request failed validation.
    Validation(ValidationError),
    /// No route matched the request.
    RouteNotFound,
    /// The path exists but not for this method.
    MethodNotAllowed,
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self::Store(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Store(err) => {
                let StoreError::NotFound { id } = &err;
                warn!(id = *id, "Item not found");
                metrics::inc_not_found();
                (
                    StatusCode::NOT_FOUND,
                    Json(ErrorDetail {
                        detail: err.to_string(),
                    }),
                )
                    .into_response()
            }
            Self::Validation(err) => {
                warn!(errors = err.errors.len(), "Request failed validation");
                metrics::inc_validation_failures();
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    Json(ValidationDetail { detail: err.errors }),
                )
                    .into_response()
            }
            Self::RouteNotFound => (
                StatusCode::NOT_FOUND,
                Json(ErrorDetail {
                    detail: "Not Found".to_string(),
                }),
            )
                .into_response(),
            Self::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                Json(ErrorDetail {
                    detail: "Method Not Allowed".to_string(),
                }),
            )
                .into_response(),
        }
    }
}
