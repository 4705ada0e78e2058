//! Unified error types for the item store service.

use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// Unified error type for the item store service.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Configuration rejected by validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// JSON serialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Item store errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No item with the given id exists.
    #[error("Item not found")]
    NotFound {
        /// The id that was looked up.
        id: i64,
    },
}

/// A single field-level validation failure.
///
/// Serialized as
/// `{"loc": ["body", "price"], "msg": "...", "type": "float_parsing"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldError {
    /// Location of the offending value, e.g. `["body", "name"]`.
    pub loc: Vec<String>,
    /// Human readable message.
    pub msg: String,
    /// Machine readable error kind.
    #[serde(rename = "type")]
    pub kind: String,
}

impl FieldError {
    /// Error located in the request body, at `field` (or the body itself when `None`).
    pub fn body(field: Option<&str>, kind: &str, msg: &str) -> Self {
        let mut loc = vec!["body".to_string()];
        if let Some(field) = field {
            loc.push(field.to_string());
        }
        Self {
            loc,
            msg: msg.to_string(),
            kind: kind.to_string(),
        }
    }

    /// Error located in a path parameter.
    pub fn path(param: &str, kind: &str, msg: &str) -> Self {
        Self {
            loc: vec!["path".to_string(), param.to_string()],
            msg: msg.to_string(),
            kind: kind.to_string(),
        }
    }
}

/// One or more field errors collected while validating a request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{} invalid field(s)", errors.len())]
pub struct ValidationError {
    /// Every field error found, in field order.
    pub errors: Vec<FieldError>,
}

impl ValidationError {
    /// Wrap a single field error.
    pub fn single(error: FieldError) -> Self {
        Self {
            errors: vec![error],
        }
    }
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, ServiceError>;
